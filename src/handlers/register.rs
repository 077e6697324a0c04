use axum::{Form, extract::State, response::Response};

use crate::{
    error::AppResult,
    flight::Flight,
    form::FormValues,
    handlers::AppState,
    models::NewUser,
    passhash, views,
};

const REPOPULATE: [&str; 3] = ["first_name", "last_name", "email"];

/// 注册页
pub async fn index(flight: Flight) -> AppResult<Response> {
    render(&flight, &FormValues::default()).await
}

async fn render(flight: &Flight, form: &FormValues) -> AppResult<Response> {
    let mut view = flight.view().await?;
    flight.repopulate(&mut view.vars, form, &REPOPULATE);
    Ok(views::register::index(view))
}

/// 处理注册表单
pub async fn store(
    State(state): State<AppState>,
    flight: Flight,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    let required = [
        "first_name",
        "last_name",
        "email",
        "password",
        "password_verify",
    ];
    if !flight.form_valid(&form, &required).await {
        return render(&flight, &form).await;
    }

    let email = form.get("email");

    if form.raw("password") != form.raw("password_verify") {
        flight.flash_error("Passwords do not match.").await;
        return render(&flight, &form).await;
    }

    let password_hash = match passhash::hash_string(form.raw("password")) {
        Ok(hash) => hash,
        Err(e) => {
            flight.flash_error_generic(&e).await;
            return Ok(flight.redirect("/register"));
        }
    };

    match state.repos.users.by_email(email).await {
        Err(e) if e.is_no_result() => {
            let new_user = NewUser {
                first_name: form.get("first_name"),
                last_name: form.get("last_name"),
                email,
                password_hash: &password_hash,
            };
            match state.repos.users.create(new_user).await {
                Ok(()) => {
                    tracing::info!("新用户注册: {}", email);
                    flight
                        .flash_success(format!("Account created successfully for: {}", email))
                        .await;
                    return Ok(flight.redirect("/login"));
                }
                Err(e) => flight.flash_error_generic(&e).await,
            }
        }
        Err(e) => flight.flash_error_generic(&e).await,
        Ok(_) => {
            flight
                .flash_error(format!("Account already exists for: {}", email))
                .await;
        }
    }

    render(&flight, &form).await
}
