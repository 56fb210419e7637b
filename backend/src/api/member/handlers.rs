//! Handler functions for the member dashboard.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use taskboard_adapters::{TaskApi, TaskId, TaskStatus};
use tower_sessions::Session;

use crate::auth::{AuthSession, SignedIn};
use crate::errors::AppError;
use crate::pages;
use crate::services::boards::{MEMBER_VIEW, MemberBoard};

const FETCH_FAILED: &str = "An error occurred while fetching tasks.";
const STATUS_UPDATED: &str = "Task Updated successfully";
const STATUS_FAILED: &str = "Failed to update task status";

#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

/// Fetch the user's tasks into the member copy. `None` when the listing
/// failed.
async fn mount(api: &dyn TaskApi, session: &Session, user: &AuthSession) -> Result<Option<MemberBoard>, AppError> {
    match api.list_tasks_for_user(&user.user_id).await {
        Ok(tasks) => {
            let board = MemberBoard::new(tasks);
            session.insert(MEMBER_VIEW, &board).await?;
            Ok(Some(board))
        }
        Err(err) => {
            tracing::warn!(user_id = %user.user_id, error = %err, "member task listing failed");
            session.remove_value(MEMBER_VIEW).await?;
            Ok(None)
        }
    }
}

fn render(board: Option<&MemberBoard>, notice: Option<&str>) -> Response {
    let tasks = board.map(|board| board.tasks.as_slice()).ok_or(FETCH_FAILED);
    pages::dashboards::member(tasks, notice).into_response()
}

/// `GET /member-dashboard`
pub async fn dashboard(
    State(api): State<Arc<dyn TaskApi>>,
    SignedIn { session, user }: SignedIn,
) -> Result<Response, AppError> {
    let board = mount(api.as_ref(), &session, &user).await?;
    Ok(render(board.as_ref(), None))
}

/// `POST /member-dashboard/tasks/{task_id}/status`
///
/// On success the member copy is patched in place; nothing is re-fetched.
pub async fn set_status(
    State(api): State<Arc<dyn TaskApi>>,
    SignedIn { session, user }: SignedIn,
    Path(task_id): Path<TaskId>,
    Form(form): Form<StatusForm>,
) -> Result<Response, AppError> {
    let applied = match form.status.parse::<TaskStatus>() {
        Ok(status) => match api.set_task_status(&task_id, status).await {
            Ok(()) => {
                tracing::info!(task_id = %task_id, status = status.as_str(), "task status updated");
                Some(status)
            }
            Err(err) => {
                tracing::warn!(task_id = %task_id, error = %err, "task status update failed");
                None
            }
        },
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "status form rejected");
            None
        }
    };

    let mut board = match session.get::<MemberBoard>(MEMBER_VIEW).await? {
        Some(board) => Some(board),
        None => mount(api.as_ref(), &session, &user).await?,
    };

    if let (Some(status), Some(board)) = (applied, board.as_mut()) {
        board.apply_status(&task_id, status);
        session.insert(MEMBER_VIEW, &*board).await?;
    }

    let notice = if applied.is_some() {
        STATUS_UPDATED
    } else {
        STATUS_FAILED
    };
    Ok(render(board.as_ref(), Some(notice)))
}
