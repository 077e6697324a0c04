use serde::{Deserialize, Serialize};

/// 用户状态，对应 user_status 表中预置的两行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserStatus {
    Active = 1,
    Inactive = 2,
}

impl UserStatus {
    /// 数据库中的 status_id
    pub fn id(self) -> i16 {
        self as i16
    }

    /// 由 status_id 还原；未知 id 视为未激活
    pub fn from_id(id: i16) -> Self {
        match id {
            1 => UserStatus::Active,
            _ => UserStatus::Inactive,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}
