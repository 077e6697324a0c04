use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::UserStatus;

/// 用户模型
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// 唯一
    pub email: String,
    /// PHC 格式的密码哈希
    #[serde(skip_serializing)]
    pub password: String,
    pub status_id: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn status(&self) -> UserStatus {
        UserStatus::from_id(self.status_id)
    }

    pub fn is_active(&self) -> bool {
        self.status() == UserStatus::Active
    }
}

/// 注册时写入的新用户
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
