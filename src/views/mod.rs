//! 服务端渲染的 HTML 视图

pub mod about;
pub mod home;
pub mod login;
pub mod note;
pub mod register;
pub mod status;

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::{flash::Flash, method_override, xsrf};

/// 视图变量
pub type Vars = HashMap<String, String>;

/// 布局需要的请求上下文（由 flight 注入）
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub site_name: String,
    pub base_uri: String,
    pub authenticated: bool,
    pub current_uri: String,
    pub token: String,
    pub flashes: Vec<Flash>,
}

/// 一次页面渲染
#[derive(Debug, Clone, Default)]
pub struct View {
    pub vars: Vars,
    layout: Layout,
}

impl View {
    pub fn new(layout: Layout) -> Self {
        Self {
            vars: Vars::new(),
            layout,
        }
    }

    /// 视图变量，缺失时为空串
    pub fn var(&self, key: &str) -> &str {
        self.vars.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.layout.authenticated
    }

    /// 相对 base_uri 的链接
    pub fn link(&self, path: &str) -> String {
        link(&self.layout.base_uri, path)
    }

    /// 表单中的 CSRF 隐藏字段
    pub fn csrf_field(&self) -> String {
        format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            xsrf::FORM_FIELD,
            escape(&self.layout.token)
        )
    }

    /// 表单中的方法改写隐藏字段
    pub fn method_field(&self, method: &str) -> String {
        format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            method_override::FORM_FIELD,
            escape(method)
        )
    }

    /// 套用布局，返回 200
    pub fn render(self, title: &str, body: &str) -> Response {
        self.render_with_status(StatusCode::OK, title, body)
    }

    pub fn render_with_status(self, status: StatusCode, title: &str, body: &str) -> Response {
        (status, Html(self.layout_html(title, body))).into_response()
    }

    fn layout_html(&self, title: &str, body: &str) -> String {
        let layout = &self.layout;
        let nav = if layout.authenticated {
            format!(
                r#"<a href="{}">Notepad</a> <a href="{}">Logout</a>"#,
                self.link("notepad"),
                self.link("logout")
            )
        } else {
            format!(
                r#"<a href="{}">Login</a> <a href="{}">Register</a>"#,
                self.link("login"),
                self.link("register")
            )
        };

        let flashes: String = layout
            .flashes
            .iter()
            .map(|f| {
                format!(
                    r#"<div class="alert {}" role="alert">{}</div>"#,
                    f.level.class(),
                    escape(&f.message)
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | {site}</title>
  <link rel="stylesheet" href="{css}">
</head>
<body data-uri="{uri}">
  <nav class="navbar"><a class="brand" href="{home}">{site}</a> <a href="{about}">About</a> {nav}</nav>
  <main class="container">
    <div id="flash-container">{flashes}</div>
{body}
  </main>
</body>
</html>"#,
            title = escape(title),
            site = escape(&layout.site_name),
            css = self.link("static/css/app.css"),
            uri = escape(&layout.current_uri),
            home = self.link(""),
            about = self.link("about"),
            nav = nav,
            flashes = flashes,
            body = body,
        )
    }
}

/// HTML 转义
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 拼接 base_uri 与路径
pub fn link(base_uri: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_uri.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 例如 `3:04 PM 01/02/2006`
pub fn pretty_time(t: &DateTime<Utc>) -> String {
    t.format("%-I:%M %p %m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::Level;
    use chrono::TimeZone;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_link() {
        assert_eq!(link("/", "login"), "/login");
        assert_eq!(link("/", ""), "/");
        assert_eq!(link("/app/", "/notepad"), "/app/notepad");
        assert_eq!(link("/app", "notepad/create"), "/app/notepad/create");
    }

    #[test]
    fn test_pretty_time() {
        let t = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(pretty_time(&t), "3:04 PM 01/02/2006");
    }

    #[test]
    fn test_layout_shows_flashes_and_nav() {
        let view = View::new(Layout {
            site_name: "Notepad".to_string(),
            base_uri: "/".to_string(),
            authenticated: true,
            current_uri: "/notepad".to_string(),
            token: "tok".to_string(),
            flashes: vec![Flash::new("<b>Saved</b>", Level::Success)],
        });
        let html = view.layout_html("Test", "<p>body</p>");
        assert!(html.contains(r#"<div class="alert alert-success" role="alert">&lt;b&gt;Saved&lt;/b&gt;</div>"#));
        assert!(html.contains(r#"href="/logout""#));
        assert!(!html.contains(r#"href="/register""#));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_csrf_field() {
        let view = View::new(Layout {
            token: "abc123".to_string(),
            ..Layout::default()
        });
        assert_eq!(
            view.csrf_field(),
            r#"<input type="hidden" name="_token" value="abc123">"#
        );
    }
}
