//! CSRF 防护：每个会话一个随机 token，所有非安全方法必须携带

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{
    error::{AppError, AppResult},
    form::{self, MAX_FORM_BYTES},
    session::CSRF_KEY,
};

/// 表单隐藏字段名
pub const FORM_FIELD: &str = "_token";
/// 请求头名（供脚本请求使用）
pub const HEADER: &str = "x-csrf-token";

/// 生成 32 字节随机 token（hex）
pub fn generate() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

/// 当前会话的 token，不存在时生成并写入会话
pub async fn token(session: &Session) -> AppResult<String> {
    if let Some(existing) = session.get::<String>(CSRF_KEY).await? {
        return Ok(existing);
    }
    let fresh = generate();
    session.insert(CSRF_KEY, &fresh).await?;
    Ok(fresh)
}

/// 常量时间比较
pub fn tokens_match(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 中间件：校验 POST/PUT/PATCH/DELETE 请求的 token
pub async fn verify(session: Session, request: Request, next: Next) -> Response {
    if request.method().is_safe() {
        return next.run(request).await;
    }

    match check(&session, request).await {
        Ok(request) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

async fn check(session: &Session, request: Request) -> AppResult<Request> {
    let expected = session.get::<String>(CSRF_KEY).await?;

    let header_token = request
        .headers()
        .get(HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| AppError::bad_request(format!("读取请求体失败: {}", e)))?;

    let provided = match header_token {
        Some(token) => token,
        None if form::is_urlencoded(&parts.headers) => {
            form::parse(&bytes).await.get(FORM_FIELD).to_string()
        }
        None => String::new(),
    };

    let valid = expected.is_some_and(|expected| tokens_match(&expected, &provided));
    if !valid {
        tracing::warn!("CSRF 校验失败: {} {}", parts.method, parts.uri.path());
        return Err(AppError::forbidden(
            "Your token expired, click here to try again.",
        ));
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    #[test]
    fn test_generate_is_random_hex() {
        let a = generate();
        let b = generate();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("abcd", "abcd"));
        assert!(!tokens_match("abcd", "abce"));
        assert!(!tokens_match("abcd", "abc"));
        assert!(!tokens_match("", ""));
    }

    #[tokio::test]
    async fn test_token_is_stable_per_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let first = token(&session).await.unwrap();
        let second = token(&session).await.unwrap();
        assert_eq!(first, second);
    }
}
