//! The admin and member dashboards.

use std::fmt::Write;

use axum::response::Html;
use taskboard_adapters::{Task, TaskId};

use super::{alert, document, encode_segment, escape, header, status_class};
use crate::services::boards::{StatusFilter, status_actions};
use crate::services::gate::{ADMIN_DASHBOARD, CREATE_TASK, MEMBER_DASHBOARD, Route};

/// Path of the delete action for `task_id`.
pub fn delete_path(task_id: &TaskId) -> String {
    format!("{ADMIN_DASHBOARD}/tasks/{}/delete", encode_segment(task_id.as_str()))
}

/// Path of the member status action for `task_id`.
pub fn status_path(task_id: &TaskId) -> String {
    format!("{MEMBER_DASHBOARD}/tasks/{}/status", encode_segment(task_id.as_str()))
}

fn assignee_names(task: &Task) -> String {
    task.assigned_to
        .iter()
        .map(|assignee| {
            if assignee.name.is_empty() {
                "Unassigned"
            } else {
                assignee.name.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn filter_form(current: StatusFilter) -> String {
    let mut options = String::new();
    for option in StatusFilter::OPTIONS {
        let selected = if option == current { " selected" } else { "" };
        let _ = write!(
            options,
            "<option value=\"{}\"{selected}>{}</option>",
            escape(option.as_str()),
            escape(option.label())
        );
    }
    format!(
        "<form method=\"get\" action=\"{ADMIN_DASHBOARD}\" class=\"inline\">\
<select name=\"status\">{options}</select> <button>Filter</button></form>"
    )
}

fn admin_card(task: &Task) -> String {
    format!(
        "<div class=\"card\"><h3>{name}</h3><p>{description}</p>\
<p><strong>Assigned To: </strong>{assignees}</p>\
<p class=\"{class}\">{status}</p>\
<p><a href=\"{edit}\">Edit</a> <a href=\"{delete}\">Delete</a></p></div>",
        name = escape(&task.name),
        description = escape(&task.description),
        assignees = escape(&assignee_names(task)),
        class = status_class(task.status),
        status = escape(task.status.as_str()),
        edit = escape(&Route::EditTask(task.id.clone()).path()),
        delete = escape(&delete_path(&task.id)),
    )
}

/// The admin dashboard. `tasks` is the filtered copy, or the listing error.
pub fn admin(tasks: Result<Vec<&Task>, &str>, filter: StatusFilter, notice: Option<&str>) -> Html<String> {
    let content = match tasks {
        Ok(tasks) => {
            let cards: String = tasks.into_iter().map(admin_card).collect();
            format!(
                "<div>{filter}<a href=\"{CREATE_TASK}\">Create New Task</a></div>\
<div class=\"grid\">{cards}</div>",
                filter = filter_form(filter),
            )
        }
        Err(message) => format!("<div class=\"error\"><p>Error: {}</p></div>", escape(message)),
    };

    document(
        "Admin Dashboard",
        &format!(
            "{header}<main>{content}</main>{notice}",
            header = header("Admin Dashboard"),
            notice = notice.map(alert).unwrap_or_default(),
        ),
    )
}

/// Confirmation step of the admin delete action.
pub fn confirm_delete(task_id: &TaskId, task: Option<&Task>) -> Html<String> {
    let name = task
        .map(|task| format!("<p><strong>{}</strong></p>", escape(&task.name)))
        .unwrap_or_default();

    document(
        "Delete task",
        &format!(
            "{header}<main><div class=\"card\"><p>Are you sure you want to delete this task?</p>{name}\
<form method=\"post\" action=\"{action}\" class=\"inline\"><button>Delete</button></form> \
<a href=\"{ADMIN_DASHBOARD}\">Cancel</a></div></main>",
            header = header("Admin Dashboard"),
            action = escape(&delete_path(task_id)),
        ),
    )
}

fn member_card(task: &Task) -> String {
    let action = escape(&status_path(&task.id));
    let buttons: String = status_actions(task)
        .map(|status| {
            format!(
                "<form method=\"post\" action=\"{action}\" class=\"inline\">\
<input type=\"hidden\" name=\"status\" value=\"{value}\">\
<button class=\"{class}\">Set as {value}</button></form>",
                value = escape(status.as_str()),
                class = status_class(status),
            )
        })
        .collect();

    format!(
        "<div class=\"card\"><h4>{name}</h4><p>{description}</p>\
<p class=\"{class}\">Status: {status}</p><div>{buttons}</div></div>",
        name = escape(&task.name),
        description = escape(&task.description),
        class = status_class(task.status),
        status = escape(task.status.as_str()),
    )
}

/// The member dashboard. `tasks` is the member copy, or the listing error.
pub fn member(tasks: Result<&[Task], &str>, notice: Option<&str>) -> Html<String> {
    let content = match tasks {
        Ok([]) => "<h2>Welcome Back!</h2><h3>Your Tasks</h3><p>No tasks assigned yet.</p>".to_string(),
        Ok(tasks) => {
            let cards: String = tasks.iter().map(member_card).collect();
            format!("<h2>Welcome Back!</h2><h3>Your Tasks</h3><div class=\"grid\">{cards}</div>")
        }
        Err(message) => format!("<div class=\"error\"><p>{}</p></div>", escape(message)),
    };

    document(
        "Member Dashboard",
        &format!(
            "{header}<main>{content}</main>{notice}",
            header = header("Member Dashboard"),
            notice = notice.map(alert).unwrap_or_default(),
        ),
    )
}
