//! 访问控制中间件

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{flight::redirect, session};

/// 只允许未登录用户访问（登录、注册页），已登录则跳回首页
pub async fn disallow_auth(session: Session, request: Request, next: Next) -> Response {
    match session::user_id(&session).await {
        Ok(Some(_)) => redirect("/"),
        Ok(None) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// 只允许已登录用户访问，未登录则跳回首页
pub async fn disallow_anon(session: Session, request: Request, next: Next) -> Response {
    match session::user_id(&session).await {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => {
            tracing::debug!("匿名访问被拒绝: {}", request.uri().path());
            redirect("/")
        }
        Err(e) => e.into_response(),
    }
}
