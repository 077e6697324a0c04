use axum::response::Response;

use super::{View, escape};

pub fn index(view: View) -> Response {
    let body = format!(
        r#"    <div class="page-header"><h1>Create an Account</h1></div>
    <form method="post" action="{action}">
      <label for="first_name">First Name</label>
      <input type="text" id="first_name" name="first_name" maxlength="48" value="{first_name}" autofocus>
      <label for="last_name">Last Name</label>
      <input type="text" id="last_name" name="last_name" maxlength="48" value="{last_name}">
      <label for="email">Email Address</label>
      <input type="email" id="email" name="email" maxlength="48" value="{email}">
      <label for="password">Password</label>
      <input type="password" id="password" name="password" maxlength="48">
      <label for="password_verify">Verify Password</label>
      <input type="password" id="password_verify" name="password_verify" maxlength="48">
      {token}
      <button type="submit">Create Account</button>
    </form>
    <p><a href="{login}">Already have an account?</a></p>"#,
        action = view.link("register"),
        first_name = escape(view.var("first_name")),
        last_name = escape(view.var("last_name")),
        email = escape(view.var("email")),
        token = view.csrf_field(),
        login = view.link("login"),
    );
    view.render("Register", &body)
}
