use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 查询没有命中任何记录（包括已软删除的记录）
    #[error("Result not found.")]
    NoResult,

    #[error("数据库错误: {0}")]
    Database(sqlx::Error),

    #[error("数据库迁移错误: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("会话错误: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("验证错误: {0}")]
    Validation(String),

    #[error("密码哈希错误: {0}")]
    PasswordHash(String),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("禁止访问: {0}")]
    Forbidden(String),

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// sqlx 的 RowNotFound 统一归一为 NoResult，其余错误原样保留
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NoResult,
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NoResult => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred on the server. Please try again later.".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("应用错误: {}", self);
        } else {
            tracing::warn!("请求被拒绝: {}", self);
        }

        views::status::error_page(status, &message)
    }
}

/// 应用程序Result类型别名
pub type AppResult<T> = Result<T, AppError>;

/// 错误构造辅助函数
impl AppError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        Self::PasswordHash(msg.into())
    }

    /// 是否为“未找到记录”
    pub fn is_no_result(&self) -> bool {
        matches!(self, AppError::NoResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_normalized() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(err.is_no_result());
        assert_eq!(err.to_string(), "Result not found.");
    }

    #[test]
    fn test_other_sqlx_errors_are_kept() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Database(_)));
        assert!(!err.is_no_result());
    }

    #[test]
    fn test_error_status_codes() {
        let resp = AppError::forbidden("bad token").into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = AppError::NoResult.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::config("broken").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_message() {
        let err = AppError::validation("email already exists");
        assert_eq!(err.to_string(), "验证错误: email already exists");
    }
}
