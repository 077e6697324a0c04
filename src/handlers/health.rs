use axum::{extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::{handlers::AppState, response::ApiResponse};

/// 存活检查
pub async fn health_check() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 数据库健康检查
pub async fn db_health_check(State(state): State<AppState>) -> ApiResponse<Value> {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match &state.database {
        Some(db) => match db.health_check().await {
            Ok(true) => ApiResponse::success(json!({
                "database": "healthy",
                "timestamp": timestamp,
            })),
            Ok(false) => ApiResponse::error_with_data(
                StatusCode::SERVICE_UNAVAILABLE,
                "database connection unhealthy",
                json!({"status": "unhealthy"}),
            ),
            Err(e) => {
                tracing::error!("数据库健康检查失败: {}", e);
                ApiResponse::error_with_data(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "database health check failed",
                    json!({"status": "error"}),
                )
            }
        },
        None => ApiResponse::error_with_data(
            StatusCode::SERVICE_UNAVAILABLE,
            "database not configured, running on in-memory storage",
            json!({"status": "unavailable"}),
        ),
    }
}
