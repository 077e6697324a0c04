use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::{
    acl,
    handlers::{AppState, about, health, home, login, notepad, register},
};

/// 创建页面路由
pub fn create_routes() -> Router<AppState> {
    // 仅限未登录用户
    let guest = Router::new()
        .route("/login", get(login::index).post(login::store))
        .route("/register", get(register::index).post(register::store))
        .route_layer(middleware::from_fn(acl::disallow_auth));

    // 仅限已登录用户
    let notes = Router::new()
        .route("/notepad", get(notepad::index))
        .route(
            "/notepad/create",
            get(notepad::create).post(notepad::store),
        )
        .route("/notepad/view/{id}", get(notepad::show))
        .route(
            "/notepad/edit/{id}",
            get(notepad::edit).patch(notepad::update),
        )
        .route("/notepad/{id}", delete(notepad::destroy))
        .route_layer(middleware::from_fn(acl::disallow_anon));

    Router::new()
        .route("/", get(home::index))
        .route("/about", get(about::index))
        .route("/logout", get(login::logout))
        .route("/health", get(health::health_check))
        .route("/health/db", get(health::db_health_check))
        .merge(guest)
        .merge(notes)
}
