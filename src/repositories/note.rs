use crate::{
    database::Database,
    error::{AppError, AppResult},
    models::Note,
    repositories::NoteRepository,
};

/// 笔记仓库（PostgreSQL）
#[derive(Clone)]
pub struct PgNoteRepository {
    db: Database,
}

impl PgNoteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// 受影响行数为0时视为未命中
fn ensure_touched(rows_affected: u64) -> AppResult<()> {
    if rows_affected == 0 {
        Err(AppError::NoResult)
    } else {
        Ok(())
    }
}

#[async_trait::async_trait]
impl NoteRepository for PgNoteRepository {
    async fn by_id(&self, id: i32, user_id: i32) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, name, user_id, created_at, updated_at, deleted_at
            FROM note
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(AppError::NoResult)
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, name, user_id, created_at, updated_at, deleted_at
            FROM note
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(notes)
    }

    async fn by_user_id_paginate(
        &self,
        user_id: i32,
        max: i64,
        offset: i64,
    ) -> AppResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, name, user_id, created_at, updated_at, deleted_at
            FROM note
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(max)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(notes)
    }

    async fn by_user_id_count(&self, user_id: i32) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM note WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(count)
    }

    async fn create(&self, name: &str, user_id: i32) -> AppResult<()> {
        sqlx::query("INSERT INTO note (name, user_id) VALUES ($1, $2)")
            .bind(name)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn update(&self, name: &str, id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE note SET
                name = $1,
                updated_at = NOW()
            WHERE id = $2 AND user_id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .bind(id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        ensure_touched(result.rows_affected())
    }

    async fn delete_hard(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        ensure_touched(result.rows_affected())
    }

    async fn delete_soft(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE note SET
                deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        ensure_touched(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_touched() {
        assert!(ensure_touched(1).is_ok());
        assert!(matches!(ensure_touched(0), Err(AppError::NoResult)));
    }
}
