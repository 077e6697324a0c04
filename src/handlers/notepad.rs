//! 笔记的增删改查；所有路由都要求登录

use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    flight::Flight,
    form::FormValues,
    handlers::AppState,
    pagination::{PageQuery, Pagination},
    views,
};

/// 列表页根路径
pub const URI: &str = "/notepad";

/// 每页条数
const PER_PAGE: u32 = 10;

/// 路径中的 id，非数字视为记录不存在
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>().map_err(|_| AppError::NoResult)
}

/// 笔记列表
pub async fn index(
    State(state): State<AppState>,
    flight: Flight,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;
    let mut pagination = Pagination::new(query.page.as_deref(), PER_PAGE);

    let items = match state
        .repos
        .notes
        .by_user_id_paginate(
            user_id,
            i64::from(pagination.per_page),
            i64::from(pagination.offset),
        )
        .await
    {
        Ok(items) => items,
        Err(e) => {
            flight.flash_error_generic(&e).await;
            Vec::new()
        }
    };

    let count = match state.repos.notes.by_user_id_count(user_id).await {
        Ok(count) => count,
        Err(e) => {
            flight.flash_error_generic(&e).await;
            0
        }
    };
    pagination.calculate_pages(count);

    let view = flight.view().await?;
    Ok(views::note::index(view, &items, &pagination))
}

/// 新建表单
pub async fn create(flight: Flight) -> AppResult<Response> {
    render_create(&flight, &FormValues::default()).await
}

async fn render_create(flight: &Flight, form: &FormValues) -> AppResult<Response> {
    let mut view = flight.view().await?;
    flight.repopulate(&mut view.vars, form, &["name"]);
    Ok(views::note::create(view))
}

/// 处理新建表单
pub async fn store(
    State(state): State<AppState>,
    flight: Flight,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;

    if !flight.form_valid(&form, &["name"]).await {
        return render_create(&flight, &form).await;
    }

    if let Err(e) = state.repos.notes.create(form.get("name"), user_id).await {
        flight.flash_error_generic(&e).await;
        return render_create(&flight, &form).await;
    }

    flight.flash_success("Item added.").await;
    Ok(flight.redirect(URI))
}

/// 查看单条
pub async fn show(
    State(state): State<AppState>,
    flight: Flight,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;

    let note = match parse_id(&id) {
        Ok(id) => state.repos.notes.by_id(id, user_id).await,
        Err(e) => Err(e),
    };

    match note {
        Ok(item) => {
            let view = flight.view().await?;
            Ok(views::note::show(view, &item))
        }
        Err(e) => {
            flight.flash_error_generic(&e).await;
            Ok(flight.redirect(URI))
        }
    }
}

/// 编辑表单
pub async fn edit(
    State(state): State<AppState>,
    flight: Flight,
    Path(id): Path<String>,
) -> AppResult<Response> {
    render_edit(&state, &flight, &id, &FormValues::default()).await
}

async fn render_edit(
    state: &AppState,
    flight: &Flight,
    id: &str,
    form: &FormValues,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;

    let note = match parse_id(id) {
        Ok(id) => state.repos.notes.by_id(id, user_id).await,
        Err(e) => Err(e),
    };

    match note {
        Ok(item) => {
            let mut view = flight.view().await?;
            flight.repopulate(&mut view.vars, form, &["name"]);
            Ok(views::note::edit(view, &item))
        }
        Err(e) => {
            flight.flash_error_generic(&e).await;
            Ok(flight.redirect(URI))
        }
    }
}

/// 处理编辑表单（PATCH）
pub async fn update(
    State(state): State<AppState>,
    flight: Flight,
    Path(id): Path<String>,
    Form(form): Form<FormValues>,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;

    if !flight.form_valid(&form, &["name"]).await {
        return render_edit(&state, &flight, &id, &form).await;
    }

    let result = match parse_id(&id) {
        Ok(note_id) => {
            state
                .repos
                .notes
                .update(form.get("name"), note_id, user_id)
                .await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        flight.flash_error_generic(&e).await;
        // 记录不存在或不属于当前用户：直接回列表
        if e.is_no_result() {
            return Ok(flight.redirect(URI));
        }
        return render_edit(&state, &flight, &id, &form).await;
    }

    flight.flash_success("Item updated.").await;
    Ok(flight.redirect(URI))
}

/// 软删除（DELETE）
pub async fn destroy(
    State(state): State<AppState>,
    flight: Flight,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let user_id = flight.require_user()?;

    let result = match parse_id(&id) {
        Ok(id) => state.repos.notes.delete_soft(id, user_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => flight.flash_notice("Item deleted.").await,
        Err(e) => flight.flash_error_generic(&e).await,
    }

    Ok(flight.redirect(URI))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::NoResult)));
        assert!(matches!(parse_id(""), Err(AppError::NoResult)));
    }
}
