use axum::response::Response;

use super::View;

pub fn index(view: View) -> Response {
    let body = r#"    <div class="page-header"><h1>About</h1></div>
    <p>A small notepad: register, log in, and keep a list of notes. Pages are rendered on the
    server, sessions live in a cookie, and every form carries an anti-forgery token.</p>"#;
    view.render("About", body)
}
