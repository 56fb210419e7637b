//! The create-task and edit-task forms.

use std::fmt::Write;

use axum::response::Html;
use taskboard_adapters::{TaskId, TaskStatus, User, UserId};

use super::{alert_then, document, escape, header};
use crate::services::forms::{FORM_STATUSES, TaskFields};
use crate::services::gate::{ADMIN_DASHBOARD, CREATE_TASK, Route};

/// Everything the create screen shows.
pub struct CreatePage<'a> {
    pub fields: &'a TaskFields,
    pub users: &'a [User],
    pub selected: &'a [UserId],
    /// Shown above the form: a failed user fetch or missing fields.
    pub error: Option<&'a str>,
    /// Outcome of a submission, shown in the modal.
    pub outcome: Option<&'a str>,
}

fn status_select(current: Option<TaskStatus>) -> String {
    let mut statuses = FORM_STATUSES.to_vec();
    if let Some(current) = current {
        if !statuses.contains(&current) {
            statuses.push(current);
        }
    }

    let mut options = String::new();
    for status in statuses {
        let selected = if Some(status) == current { " selected" } else { "" };
        let _ = write!(
            options,
            "<option value=\"{value}\"{selected}>{value}</option>",
            value = escape(status.as_str())
        );
    }
    format!("<select id=\"status\" name=\"status\" required>{options}</select>")
}

fn field_inputs(fields: &TaskFields) -> String {
    format!(
        "<label for=\"name\">Task Name</label>\
<input type=\"text\" id=\"name\" name=\"name\" value=\"{name}\" required>\
<label for=\"description\">Description</label>\
<textarea id=\"description\" name=\"description\" rows=\"4\" required>{description}</textarea>\
<label for=\"dueDate\">Due Date</label>\
<input type=\"date\" id=\"dueDate\" name=\"dueDate\" value=\"{due_date}\" required>\
<label for=\"status\">Status</label>{status}",
        name = escape(&fields.name),
        description = escape(&fields.description),
        due_date = escape(&fields.due_date),
        status = status_select(fields.status),
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!("<div class=\"error\"><p>{}</p></div>", escape(message)))
        .unwrap_or_default()
}

pub fn create(page: CreatePage<'_>) -> Html<String> {
    let assignees = if page.users.is_empty() {
        "<p>No users available</p>".to_string()
    } else {
        let mut boxes = String::new();
        for user in page.users {
            let checked = if page.selected.contains(&user.id) { " checked" } else { "" };
            let _ = write!(
                boxes,
                "<div><input type=\"checkbox\" id=\"user-{id}\" name=\"assignee\" value=\"{id}\"{checked}> \
<label for=\"user-{id}\" class=\"inline\">{name} ({email})</label></div>",
                id = escape(user.id.as_str()),
                name = escape(&user.name),
                email = escape(&user.email),
            );
        }
        boxes
    };

    let modal = page
        .outcome
        .map(|message| alert_then(message, ADMIN_DASHBOARD))
        .unwrap_or_default();

    document(
        "Create Task",
        &format!(
            "{header}<main><div class=\"card\">{error}\
<form method=\"post\" action=\"{CREATE_TASK}\">{fields}\
<label>Assign Users</label>{assignees}\
<p><button>Create Task</button> <a href=\"{ADMIN_DASHBOARD}\">Back</a></p></form>\
</div></main>{modal}",
            header = header("Create Task"),
            error = error_block(page.error),
            fields = field_inputs(page.fields),
        ),
    )
}

pub fn edit(task_id: &TaskId, fields: &TaskFields, error: Option<&str>) -> Html<String> {
    document(
        "Edit Task",
        &format!(
            "{header}<main><div class=\"card\">{error}\
<form method=\"post\" action=\"{action}\">{fields}\
<p><button>Update Task</button> <a href=\"{ADMIN_DASHBOARD}\">Back</a></p></form>\
</div></main>",
            header = header("Edit Task"),
            error = error_block(error),
            action = escape(&Route::EditTask(task_id.clone()).path()),
            fields = field_inputs(fields),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_select_keeps_in_progress_when_editing() {
        let html = status_select(Some(TaskStatus::InProgress));
        assert!(html.contains("<option value=\"In Progress\" selected>"));
        assert!(html.contains("<option value=\"Pending\">"));
    }

    #[test]
    fn status_select_offers_pending_and_completed() {
        let html = status_select(Some(TaskStatus::Pending));
        assert!(!html.contains("In Progress"));
        assert!(html.contains("<option value=\"Completed\">"));
    }
}
