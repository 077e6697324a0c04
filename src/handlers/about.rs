use axum::response::Response;

use crate::{error::AppResult, flight::Flight, views};

pub async fn index(flight: Flight) -> AppResult<Response> {
    Ok(views::about::index(flight.view().await?))
}
