//! 一次性提示消息：写入会话，下一次渲染页面时取出并清除

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{error::AppResult, session::FLASH_KEY};

/// 通用错误提示，具体错误只写日志
pub const GENERIC_ERROR: &str = "An error occurred on the server. Please try again later.";

/// 消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Notice,
    Warning,
    Error,
}

impl Level {
    /// 对应的 CSS class
    pub fn class(self) -> &'static str {
        match self {
            Level::Success => "alert-success",
            Level::Notice => "alert-info",
            Level::Warning => "alert-warning",
            Level::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    pub level: Level,
}

impl Flash {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// 追加一条消息
pub async fn add(session: &Session, flash: Flash) -> AppResult<()> {
    let mut pending: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(flash);
    session.insert(FLASH_KEY, pending).await?;
    Ok(())
}

/// 取出并清空全部待显示消息
pub async fn take(session: &Session) -> AppResult<Vec<Flash>> {
    Ok(session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}
