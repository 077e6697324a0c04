pub mod config;
pub mod error;
pub mod response;

pub mod acl;
pub mod database;
pub mod flash;
pub mod flight;
pub mod form;
pub mod handlers;
pub mod method_override;
pub mod models;
pub mod pagination;
pub mod passhash;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod views;
pub mod xsrf;

use axum::{Router, middleware};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionStore;

use crate::handlers::AppState;

/// 组装完整应用：路由、静态文件、CSRF、会话、日志，最外层为方法改写
pub fn build_app<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let static_files = ServeDir::new(&state.config.asset.folder);
    let session_layer = session::layer(&state.config.session, store);

    let app = routes::create_routes()
        .nest_service("/static", static_files)
        .fallback(handlers::status::not_found)
        .layer(middleware::from_fn(xsrf::verify))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new()
        .fallback_service(app)
        .layer(middleware::from_fn(method_override::method_override))
}
