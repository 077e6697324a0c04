use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{NewUser, Note, User, UserStatus},
    repositories::{NoteRepository, UserRepository},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    notes: Vec<Note>,
    next_user_id: i32,
    next_note_id: i32,
}

/// 内存仓库：同时实现用户与笔记接口，语义与 PostgreSQL 实现保持一致
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 修改用户状态（用于模拟后台停用账号）
    pub async fn set_user_status(&self, email: &str, status: UserStatus) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .ok_or(AppError::NoResult)?;
        user.status_id = status.id();
        user.updated_at = Utc::now();
        Ok(())
    }
}

fn visible(note: &Note, user_id: i32) -> bool {
    note.user_id == user_id && note.deleted_at.is_none()
}

#[async_trait::async_trait]
impl UserRepository for MemoryRepository {
    async fn by_email(&self, email: &str) -> AppResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned()
            .ok_or(AppError::NoResult)
    }

    async fn create(&self, user: NewUser<'_>) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::validation(format!(
                "duplicate email: {}",
                user.email
            )));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let id = tables.next_user_id;
        tables.users.push(User {
            id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            password: user.password_hash.to_string(),
            status_id: UserStatus::Active.id(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl NoteRepository for MemoryRepository {
    async fn by_id(&self, id: i32, user_id: i32) -> AppResult<Note> {
        let tables = self.tables.read().await;
        tables
            .notes
            .iter()
            .find(|n| n.id == id && visible(n, user_id))
            .cloned()
            .ok_or(AppError::NoResult)
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .filter(|n| visible(n, user_id))
            .cloned()
            .collect())
    }

    async fn by_user_id_paginate(
        &self,
        user_id: i32,
        max: i64,
        offset: i64,
    ) -> AppResult<Vec<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .filter(|n| visible(n, user_id))
            .skip(offset.max(0) as usize)
            .take(max.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn by_user_id_count(&self, user_id: i32) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().filter(|n| visible(n, user_id)).count() as i64)
    }

    async fn create(&self, name: &str, user_id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::validation(format!("unknown user id: {}", user_id)));
        }

        tables.next_note_id += 1;
        let now = Utc::now();
        let id = tables.next_note_id;
        tables.notes.push(Note {
            id,
            name: name.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        Ok(())
    }

    async fn update(&self, name: &str, id: i32, user_id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let note = tables
            .notes
            .iter_mut()
            .find(|n| n.id == id && visible(n, user_id))
            .ok_or(AppError::NoResult)?;
        note.name = name.to_string();
        note.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_hard(&self, id: i32, user_id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables
            .notes
            .retain(|n| !(n.id == id && n.user_id == user_id));
        if tables.notes.len() == before {
            return Err(AppError::NoResult);
        }
        Ok(())
    }

    async fn delete_soft(&self, id: i32, user_id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let note = tables
            .notes
            .iter_mut()
            .find(|n| n.id == id && visible(n, user_id))
            .ok_or(AppError::NoResult)?;
        let now = Utc::now();
        note.deleted_at = Some(now);
        note.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo_with_users() -> (MemoryRepository, i32, i32) {
        let repo = MemoryRepository::new();
        for email in ["ada@example.com", "bob@example.com"] {
            UserRepository::create(
                &repo,
                NewUser {
                    first_name: "Test",
                    last_name: "User",
                    email,
                    password_hash: "hash",
                },
            )
            .await
            .unwrap();
        }
        let ada = repo.by_email("ada@example.com").await.unwrap().id;
        let bob = repo.by_email("bob@example.com").await.unwrap().id;
        (repo, ada, bob)
    }

    #[tokio::test]
    async fn test_user_lookup_and_uniqueness() {
        let (repo, ada, _) = repo_with_users().await;

        let user = repo.by_email("ada@example.com").await.unwrap();
        assert_eq!(user.id, ada);
        assert!(user.is_active());

        assert!(matches!(
            repo.by_email("nobody@example.com").await,
            Err(AppError::NoResult)
        ));

        let duplicate = UserRepository::create(
            &repo,
            NewUser {
                first_name: "Again",
                last_name: "User",
                email: "ada@example.com",
                password_hash: "hash",
            },
        )
        .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_set_user_status() {
        let (repo, _, _) = repo_with_users().await;
        repo.set_user_status("bob@example.com", UserStatus::Inactive)
            .await
            .unwrap();
        let bob = repo.by_email("bob@example.com").await.unwrap();
        assert_eq!(bob.status(), UserStatus::Inactive);
    }

    #[tokio::test]
    async fn test_notes_are_scoped_by_owner() {
        let (repo, ada, bob) = repo_with_users().await;
        NoteRepository::create(&repo, "ada's note", ada).await.unwrap();

        let notes = repo.by_user_id(ada).await.unwrap();
        assert_eq!(notes.len(), 1);
        let id = notes[0].id;

        assert!(repo.by_user_id(bob).await.unwrap().is_empty());
        assert!(matches!(repo.by_id(id, bob).await, Err(AppError::NoResult)));
        assert!(matches!(
            repo.update("hijacked", id, bob).await,
            Err(AppError::NoResult)
        ));
        assert!(matches!(
            repo.delete_soft(id, bob).await,
            Err(AppError::NoResult)
        ));
        assert_eq!(repo.by_id(id, ada).await.unwrap().name, "ada's note");
    }

    #[tokio::test]
    async fn test_update_changes_name() {
        let (repo, ada, _) = repo_with_users().await;
        NoteRepository::create(&repo, "draft", ada).await.unwrap();
        let id = repo.by_user_id(ada).await.unwrap()[0].id;

        repo.update("final", id, ada).await.unwrap();
        assert_eq!(repo.by_id(id, ada).await.unwrap().name, "final");
    }

    #[tokio::test]
    async fn test_soft_delete_hides_note() {
        let (repo, ada, _) = repo_with_users().await;
        NoteRepository::create(&repo, "one", ada).await.unwrap();
        NoteRepository::create(&repo, "two", ada).await.unwrap();
        let id = repo.by_user_id(ada).await.unwrap()[0].id;

        repo.delete_soft(id, ada).await.unwrap();

        assert_eq!(repo.by_user_id_count(ada).await.unwrap(), 1);
        assert!(matches!(repo.by_id(id, ada).await, Err(AppError::NoResult)));
        assert!(matches!(
            repo.delete_soft(id, ada).await,
            Err(AppError::NoResult)
        ));
        // 硬删除不受软删除标记影响
        repo.delete_hard(id, ada).await.unwrap();
        assert!(matches!(
            repo.delete_hard(id, ada).await,
            Err(AppError::NoResult)
        ));
    }

    #[tokio::test]
    async fn test_paginate() {
        let (repo, ada, _) = repo_with_users().await;
        for i in 0..25 {
            NoteRepository::create(&repo, &format!("note {}", i), ada)
                .await
                .unwrap();
        }

        let first = repo.by_user_id_paginate(ada, 10, 0).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].name, "note 0");

        let last = repo.by_user_id_paginate(ada, 10, 20).await.unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[4].name, "note 24");

        assert!(repo.by_user_id_paginate(ada, 10, 30).await.unwrap().is_empty());
        assert_eq!(repo.by_user_id_count(ada).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_note_requires_existing_user() {
        let repo = MemoryRepository::new();
        assert!(NoteRepository::create(&repo, "orphan", 42).await.is_err());
    }
}
