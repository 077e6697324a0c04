pub mod memory;
pub mod note;
pub mod user;

pub use memory::MemoryRepository;
pub use note::PgNoteRepository;
pub use user::PgUserRepository;

use std::sync::Arc;

use crate::{
    database::Database,
    error::AppResult,
    models::{NewUser, Note, User},
};

/// 用户数据访问接口
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// 按邮箱查找未删除的用户，不存在时返回 NoResult
    async fn by_email(&self, email: &str) -> AppResult<User>;

    /// 创建处于激活状态的用户
    async fn create(&self, user: NewUser<'_>) -> AppResult<()>;
}

/// 笔记数据访问接口，所有操作都以 user_id 限定归属
#[async_trait::async_trait]
pub trait NoteRepository: Send + Sync {
    /// 获取单条笔记，不存在、不属于该用户或已删除时返回 NoResult
    async fn by_id(&self, id: i32, user_id: i32) -> AppResult<Note>;

    /// 获取用户的全部笔记
    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>>;

    /// 分页获取用户笔记，按 id 升序
    async fn by_user_id_paginate(
        &self,
        user_id: i32,
        max: i64,
        offset: i64,
    ) -> AppResult<Vec<Note>>;

    /// 统计用户笔记数量
    async fn by_user_id_count(&self, user_id: i32) -> AppResult<i64>;

    /// 新增笔记
    async fn create(&self, name: &str, user_id: i32) -> AppResult<()>;

    /// 修改笔记名称，未命中时返回 NoResult
    async fn update(&self, name: &str, id: i32, user_id: i32) -> AppResult<()>;

    /// 物理删除
    async fn delete_hard(&self, id: i32, user_id: i32) -> AppResult<()>;

    /// 软删除（写入 deleted_at）
    async fn delete_soft(&self, id: i32, user_id: i32) -> AppResult<()>;
}

/// 处理器使用的仓库集合
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub notes: Arc<dyn NoteRepository>,
}

impl Repositories {
    /// PostgreSQL 实现
    pub fn postgres(db: Database) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.clone())),
            notes: Arc::new(PgNoteRepository::new(db)),
        }
    }

    /// 内存实现（无数据库模式与测试）
    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryRepository::new()))
    }

    /// 共享已有的内存仓库
    pub fn from_memory(store: Arc<MemoryRepository>) -> Self {
        Self {
            users: store.clone(),
            notes: store,
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
