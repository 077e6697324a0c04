//! HTML 表单只能 POST：通过隐藏字段 `_method` 改写为 PATCH/PUT/DELETE。
//! 必须包在路由器外层，改写才会影响路由匹配。

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::form::{self, MAX_FORM_BYTES};

/// 表单中的方法字段
pub const FORM_FIELD: &str = "_method";

/// `_method` 允许的取值
fn overridden(value: &str) -> Option<Method> {
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

pub async fn method_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST || !form::is_urlencoded(request.headers()) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("读取表单失败: {}", e);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    if let Some(method) = overridden(form::parse(&bytes).await.get(FORM_FIELD)) {
        tracing::debug!("方法改写: POST -> {} {}", method, parts.uri.path());
        parts.method = method;
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overridden() {
        assert_eq!(overridden("delete"), Some(Method::DELETE));
        assert_eq!(overridden("PATCH"), Some(Method::PATCH));
        assert_eq!(overridden("Put"), Some(Method::PUT));
        assert_eq!(overridden("GET"), None);
        assert_eq!(overridden(""), None);
    }
}
