use axum::{Form, extract::State, response::Response};

use crate::{
    error::AppResult,
    flight::Flight,
    form::FormValues,
    handlers::AppState,
    passhash,
    session::{self, EMAIL_KEY, FIRST_NAME_KEY, USER_ID_KEY},
    views,
};

/// 登录页
pub async fn index(flight: Flight) -> AppResult<Response> {
    render(&flight, &FormValues::default()).await
}

async fn render(flight: &Flight, form: &FormValues) -> AppResult<Response> {
    let mut view = flight.view().await?;
    flight.repopulate(&mut view.vars, form, &["email"]);
    Ok(views::login::index(view))
}

/// 处理登录表单
pub async fn store(
    State(state): State<AppState>,
    flight: Flight,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    if !flight.form_valid(&form, &["email", "password"]).await {
        return render(&flight, &form).await;
    }

    let email = form.get("email");
    let password = form.raw("password");

    match state.repos.users.by_email(email).await {
        Err(e) if !e.is_no_result() => flight.flash_error_generic(&e).await,
        Ok(user) if passhash::match_string(&user.password, password) => {
            if !user.is_active() {
                flight
                    .flash_notice("Account is inactive so login is disabled.")
                    .await;
            } else {
                session::empty(&flight.session).await?;
                flight.flash_success("Login successful!").await;
                flight.session.insert(USER_ID_KEY, user.id).await?;
                flight.session.insert(EMAIL_KEY, &user.email).await?;
                flight
                    .session
                    .insert(FIRST_NAME_KEY, &user.first_name)
                    .await?;
                tracing::info!("用户登录: {}", user.email);
                return Ok(flight.redirect("/"));
            }
        }
        _ => flight.flash_warning("Password is incorrect").await,
    }

    render(&flight, &form).await
}

/// 登出：清空会话后回到首页
pub async fn logout(flight: Flight) -> AppResult<Response> {
    if flight.is_authenticated() {
        session::empty(&flight.session).await?;
        flight.flash_notice("Goodbye!").await;
    }

    Ok(flight.redirect("/"))
}
