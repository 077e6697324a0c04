use axum::response::Response;

use super::{View, escape, pretty_time};
use crate::{models::Note, pagination::Pagination};

/// 笔记列表（分页）
pub fn index(view: View, items: &[Note], pagination: &Pagination) -> Response {
    let rows: String = if items.is_empty() {
        r#"      <p class="empty">No items yet.</p>"#.to_string()
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    r#"      <div class="note">
        <a href="{show}">{name}</a>
        <span class="time">{updated}</span>
        <a href="{edit}">Edit</a>
        <form method="post" action="{delete}" class="inline">
          {method}{token}
          <button type="submit">Delete</button>
        </form>
      </div>
"#,
                    show = view.link(&format!("notepad/view/{}", item.id)),
                    name = escape(&item.name),
                    updated = pretty_time(&item.updated_at),
                    edit = view.link(&format!("notepad/edit/{}", item.id)),
                    delete = view.link(&format!("notepad/{}", item.id)),
                    method = view.method_field("DELETE"),
                    token = view.csrf_field(),
                )
            })
            .collect()
    };

    let body = format!(
        r#"    <div class="page-header"><h1>Notepad</h1></div>
    <p><a href="{create}">Add Note</a></p>
    <div class="notes">
{rows}
    </div>
{pager}"#,
        create = view.link("notepad/create"),
        rows = rows,
        pager = pager(&view, pagination),
    );
    view.render("Notepad", &body)
}

fn pager(view: &View, p: &Pagination) -> String {
    let prev = match p.prev_page() {
        Some(page) => format!(
            r#"<a href="{}?page={}">&laquo; Previous</a>"#,
            view.link("notepad"),
            page
        ),
        None => String::new(),
    };
    let next = match p.next_page() {
        Some(page) => format!(
            r#"<a href="{}?page={}">Next &raquo;</a>"#,
            view.link("notepad"),
            page
        ),
        None => String::new(),
    };
    format!(
        r#"    <nav class="pager">{} <span>Page {} of {}</span> {}</nav>"#,
        prev, p.page, p.total_pages, next
    )
}

/// 新建表单
pub fn create(view: View) -> Response {
    let body = format!(
        r#"    <div class="page-header"><h1>Add Note</h1></div>
    <form method="post" action="{action}">
      <label for="name">Item</label>
      <input type="text" id="name" name="name" value="{name}" autofocus>
      {token}
      <button type="submit">Add</button>
    </form>
    <p><a href="{back}">Back</a></p>"#,
        action = view.link("notepad/create"),
        name = escape(view.var("name")),
        token = view.csrf_field(),
        back = view.link("notepad"),
    );
    view.render("Add Note", &body)
}

pub fn show(view: View, item: &Note) -> Response {
    let body = format!(
        r#"    <div class="page-header"><h1>View Note</h1></div>
    <p class="note-name">{name}</p>
    <p class="time">Created {created}, updated {updated}</p>
    <p><a href="{edit}">Edit</a> <a href="{back}">Back</a></p>"#,
        name = escape(&item.name),
        created = pretty_time(&item.created_at),
        updated = pretty_time(&item.updated_at),
        edit = view.link(&format!("notepad/edit/{}", item.id)),
        back = view.link("notepad"),
    );
    view.render("View Note", &body)
}

/// 编辑表单；回填值优先于库中的值
pub fn edit(view: View, item: &Note) -> Response {
    let name = match view.var("name") {
        "" => item.name.as_str(),
        submitted => submitted,
    };
    let body = format!(
        r#"    <div class="page-header"><h1>Edit Note</h1></div>
    <form method="post" action="{action}">
      <label for="name">Item</label>
      <input type="text" id="name" name="name" value="{name}" autofocus>
      {method}{token}
      <button type="submit">Save</button>
    </form>
    <p><a href="{back}">Back</a></p>"#,
        action = view.link(&format!("notepad/edit/{}", item.id)),
        name = escape(name),
        method = view.method_field("PATCH"),
        token = view.csrf_field(),
        back = view.link("notepad"),
    );
    view.render("Edit Note", &body)
}
