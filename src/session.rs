//! 基于 cookie 的会话：键名约定与会话层构建

use tower_sessions::{
    Expiry, Session, SessionManagerLayer, SessionStore, cookie::SameSite,
};

use crate::{config::SessionConfig, error::AppResult};

/// 已登录用户 id
pub const USER_ID_KEY: &str = "id";
/// 已登录用户邮箱
pub const EMAIL_KEY: &str = "email";
/// 已登录用户名字
pub const FIRST_NAME_KEY: &str = "first_name";
/// 待显示的 flash 消息
pub const FLASH_KEY: &str = "_flash";
/// 会话级 CSRF token
pub const CSRF_KEY: &str = "_csrf";

/// 按配置构建会话层
pub fn layer<S>(config: &SessionConfig, store: S) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.lifetime_minutes,
        )))
}

/// 清空会话并更换会话 id（登录、登出时调用）
pub async fn empty(session: &Session) -> AppResult<()> {
    session.clear().await;
    session.cycle_id().await?;
    Ok(())
}

/// 当前登录用户 id
pub async fn user_id(session: &Session) -> AppResult<Option<i32>> {
    Ok(session.get::<i32>(USER_ID_KEY).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_empty_clears_values() {
        let session = session();
        session.insert(USER_ID_KEY, 7).await.unwrap();
        session.insert(FIRST_NAME_KEY, "Ada").await.unwrap();
        assert_eq!(user_id(&session).await.unwrap(), Some(7));

        empty(&session).await.unwrap();

        assert_eq!(user_id(&session).await.unwrap(), None);
        assert!(
            session
                .get::<String>(FIRST_NAME_KEY)
                .await
                .unwrap()
                .is_none()
        );
    }
}
