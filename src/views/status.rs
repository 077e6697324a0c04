use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::{View, escape};

/// 路由未命中
pub fn not_found(view: View) -> Response {
    let body = r#"    <div class="page-header"><h1>Not Found</h1></div>
    <p>The page you requested could not be found.</p>"#;
    view.render_with_status(StatusCode::NOT_FOUND, "Not Found", body)
}

/// 错误页：不依赖会话，出错时也能渲染
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{code} {reason}</title></head>
<body>
  <h1>{code} {reason}</h1>
  <p>{message}</p>
  <p><a href="/">Home</a></p>
</body>
</html>"#,
        code = status.as_u16(),
        reason = escape(reason),
        message = escape(message),
    );
    (status, Html(html)).into_response()
}
