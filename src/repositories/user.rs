use crate::{
    database::Database,
    error::{AppError, AppResult},
    models::{NewUser, User, UserStatus},
    repositories::UserRepository,
};

/// 用户仓库（PostgreSQL）
#[derive(Clone)]
pub struct PgUserRepository {
    db: Database,
}

impl PgUserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UserRepository for PgUserRepository {
    async fn by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, first_name, last_name, email, password, status_id,
                created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(AppError::NoResult)
    }

    async fn create(&self, user: NewUser<'_>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, password, status_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(UserStatus::Active.id())
        .execute(self.db.pool())
        .await?;

        tracing::debug!("已创建用户: {}", user.email);
        Ok(())
    }
}
