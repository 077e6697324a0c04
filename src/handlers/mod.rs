pub mod about;
pub mod health;
pub mod home;
pub mod login;
pub mod notepad;
pub mod register;
pub mod status;

use std::sync::Arc;

use crate::{config::Config, database::Database, repositories::Repositories};

/// 应用状态
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repos: Repositories,
    /// 无数据库模式下为 None
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories, database: Option<Database>) -> Self {
        Self {
            config: Arc::new(config),
            repos,
            database,
        }
    }

    /// 内存仓库，无数据库
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Repositories::memory(), None)
    }
}
