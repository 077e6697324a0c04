use axum::response::Response;

use crate::{error::AppResult, flight::Flight, views};

/// 路由未命中时的 404 页面
pub async fn not_found(flight: Flight) -> AppResult<Response> {
    tracing::debug!("未匹配的路由");
    Ok(views::status::not_found(flight.view().await?))
}
