use axum::response::Response;

use super::{View, escape};

pub fn index(view: View) -> Response {
    let body = if view.is_authenticated() {
        format!(
            r#"    <div class="page-header"><h1>Hi {}</h1></div>
    <p>You have arrived. Head over to your <a href="{}">notepad</a>.</p>"#,
            escape(view.var("first_name")),
            view.link("notepad")
        )
    } else {
        format!(
            r#"    <div class="page-header"><h1>Welcome</h1></div>
    <p>Please <a href="{}">log in</a> or <a href="{}">create an account</a>.</p>"#,
            view.link("login"),
            view.link("register")
        )
    };
    view.render("Home", &body)
}
