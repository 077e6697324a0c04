use axum::response::Response;

use crate::{error::AppResult, flight::Flight, views};

/// 首页；登录后显示名字
pub async fn index(flight: Flight) -> AppResult<Response> {
    let view = flight.view().await?;
    Ok(views::home::index(view))
}
