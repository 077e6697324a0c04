//! 请求上下文：会话、登录状态、flash、表单校验与视图构建

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::LOCATION, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    flash::{self, Flash, GENERIC_ERROR, Level},
    form::FormValues,
    handlers::AppState,
    session::{self, FIRST_NAME_KEY},
    views::{Layout, Vars, View},
    xsrf,
};

/// 302 跳转
pub fn redirect(uri: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, uri.to_string())]).into_response()
}

/// 每个请求一份的上下文
pub struct Flight {
    pub session: Session,
    pub config: Arc<Config>,
    pub user_id: Option<i32>,
    uri: String,
}

impl FromRequestParts<AppState> for Flight {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;
        let user_id = session::user_id(&session).await?;

        Ok(Self {
            session,
            config: state.config.clone(),
            user_id,
            uri: parts.uri.path().to_string(),
        })
    }
}

impl Flight {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// 已登录用户 id；ACL 中间件之后调用
    pub fn require_user(&self) -> AppResult<i32> {
        self.user_id.ok_or_else(|| AppError::forbidden("login required"))
    }

    async fn flash(&self, level: Level, message: impl Into<String>) {
        if let Err(e) = flash::add(&self.session, Flash::new(message, level)).await {
            tracing::error!("写入 flash 失败: {}", e);
        }
    }

    pub async fn flash_success(&self, message: impl Into<String>) {
        self.flash(Level::Success, message).await;
    }

    pub async fn flash_notice(&self, message: impl Into<String>) {
        self.flash(Level::Notice, message).await;
    }

    pub async fn flash_warning(&self, message: impl Into<String>) {
        self.flash(Level::Warning, message).await;
    }

    pub async fn flash_error(&self, message: impl Into<String>) {
        self.flash(Level::Error, message).await;
    }

    /// 记录真实错误，只向用户展示通用提示
    pub async fn flash_error_generic(&self, err: &AppError) {
        tracing::error!("{} 处理失败: {}", self.uri, err);
        self.flash(Level::Error, GENERIC_ERROR).await;
    }

    /// 必填字段校验；缺失时写入错误提示
    pub async fn form_valid(&self, form: &FormValues, fields: &[&str]) -> bool {
        match form.first_missing(fields) {
            None => true,
            Some(field) => {
                self.flash_error(format!("Field missing: {}", field)).await;
                false
            }
        }
    }

    /// 把提交的字段回填到视图
    pub fn repopulate(&self, vars: &mut Vars, form: &FormValues, fields: &[&str]) {
        for field in fields {
            let value = form.get(field);
            if !value.is_empty() {
                vars.insert(field.to_string(), value.to_string());
            }
        }
    }

    /// 构建视图：注入登录状态、当前路径、CSRF token 与待显示 flash
    pub async fn view(&self) -> AppResult<View> {
        let token = xsrf::token(&self.session).await?;
        let flashes = flash::take(&self.session).await?;

        let mut view = View::new(Layout {
            site_name: self.config.view.site_name.clone(),
            base_uri: self.config.view.base_uri.clone(),
            authenticated: self.is_authenticated(),
            current_uri: self.uri.clone(),
            token,
            flashes,
        });

        if self.is_authenticated() {
            if let Some(first_name) = self.session.get::<String>(FIRST_NAME_KEY).await? {
                view.vars.insert(FIRST_NAME_KEY.to_string(), first_name);
            }
        }

        Ok(view)
    }

    pub fn redirect(&self, uri: &str) -> Response {
        redirect(uri)
    }
}
