//! 表单数据：必填校验、回填，以及中间件中对已缓冲表单体的解析

use std::collections::HashMap;

use axum::{
    Form,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue, Method, header::CONTENT_TYPE},
};
use serde::Deserialize;

/// 中间件缓冲表单体的上限
pub const MAX_FORM_BYTES: usize = 1024 * 1024;

const URLENCODED: &str = "application/x-www-form-urlencoded";

/// 提交的表单字段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    /// 字段值（去除首尾空白），缺失时为空串
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(|v| v.trim()).unwrap_or_default()
    }

    /// 第一个缺失或为空的必填字段
    pub fn first_missing<'a>(&self, fields: &[&'a str]) -> Option<&'a str> {
        fields.iter().copied().find(|f| self.get(f).is_empty())
    }

    /// 原样取值（密码等不应去空白的字段）
    pub fn raw(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormValues {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// 请求体是否为 urlencoded 表单
pub fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(URLENCODED))
}

/// 解析已缓冲的 urlencoded 表单体，格式错误时返回空表单
pub async fn parse(bytes: &Bytes) -> FormValues {
    let mut request = Request::new(Body::from(bytes.clone()));
    *request.method_mut() = Method::POST;
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(URLENCODED));

    match Form::<FormValues>::from_request(request, &()).await {
        Ok(Form(values)) => values,
        Err(e) => {
            tracing::debug!("表单解析失败: {}", e);
            FormValues::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_missing() {
        let form = FormValues::from([("email", "a@b.c"), ("password", "   ")]);
        assert_eq!(form.first_missing(&["email"]), None);
        assert_eq!(form.first_missing(&["email", "password"]), Some("password"));
        assert_eq!(form.first_missing(&["name", "email"]), Some("name"));
    }

    #[test]
    fn test_get_trims_but_raw_does_not() {
        let form = FormValues::from([("name", "  hello "), ("password", " pw ")]);
        assert_eq!(form.get("name"), "hello");
        assert_eq!(form.raw("password"), " pw ");
        assert_eq!(form.get("absent"), "");
    }

    #[tokio::test]
    async fn test_parse_buffered_body() {
        let bytes = Bytes::from_static(b"_method=DELETE&_token=abc&name=a+b%21");
        let form = parse(&bytes).await;
        assert_eq!(form.get("_method"), "DELETE");
        assert_eq!(form.get("_token"), "abc");
        assert_eq!(form.get("name"), "a b!");
    }

    #[test]
    fn test_is_urlencoded() {
        let mut headers = HeaderMap::new();
        assert!(!is_urlencoded(&headers));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(is_urlencoded(&headers));
    }
}
