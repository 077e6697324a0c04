use axum::response::Response;

use super::{View, escape};

pub fn index(view: View) -> Response {
    let body = format!(
        r#"    <div class="page-header"><h1>Login</h1></div>
    <form method="post" action="{action}">
      <label for="email">Email Address</label>
      <input type="email" id="email" name="email" maxlength="48" value="{email}" autofocus>
      <label for="password">Password</label>
      <input type="password" id="password" name="password" maxlength="48">
      {token}
      <button type="submit">Login</button>
    </form>
    <p><a href="{register}">Create a new account.</a></p>"#,
        action = view.link("login"),
        email = escape(view.var("email")),
        token = view.csrf_field(),
        register = view.link("register"),
    );
    view.render("Login", &body)
}
