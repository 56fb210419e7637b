//! Handler functions for the admin dashboard.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use taskboard_adapters::{TaskApi, TaskId};
use tower_sessions::Session;

use crate::auth::Viewer;
use crate::errors::AppError;
use crate::pages;
use crate::services::boards::{ADMIN_VIEW, AdminBoard, StatusFilter};
use crate::services::gate::{self, Access};

const FETCH_FAILED: &str = "An error occurred while fetching tasks";
const DELETED: &str = "Task deleted successfully";

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
}

/// The fetched copy, or the message replacing the screen.
type Listing = Result<AdminBoard, String>;

/// Fetch every task and replace the admin copy with the result.
async fn mount(api: &dyn TaskApi, session: &Session) -> Result<Listing, AppError> {
    match api.list_tasks().await {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), "admin tasks fetched");
            let board = AdminBoard::new(tasks);
            session.insert(ADMIN_VIEW, &board).await?;
            Ok(Ok(board))
        }
        Err(err) => {
            tracing::warn!(error = %err, "admin task listing failed");
            session.remove_value(ADMIN_VIEW).await?;
            Ok(Err(format!("{FETCH_FAILED}: {err}")))
        }
    }
}

/// The stored copy, mounting first when there is none.
async fn current(api: &dyn TaskApi, session: &Session) -> Result<Listing, AppError> {
    match session.get::<AdminBoard>(ADMIN_VIEW).await? {
        Some(board) => Ok(Ok(board)),
        None => mount(api, session).await,
    }
}

fn render(listing: &Listing, filter: StatusFilter, notice: Option<&str>) -> Response {
    let tasks = listing
        .as_ref()
        .map(|board| board.visible(filter))
        .map_err(String::as_str);
    pages::dashboards::admin(tasks, filter, notice).into_response()
}

fn denied() -> Response {
    pages::auth::placeholder().into_response()
}

/// `GET /Admin-dashboard[?status=]`
///
/// Without a filter this is a mount and always fetches. With one, the
/// stored copy is filtered and no listing request is made.
pub async fn dashboard(
    State(api): State<Arc<dyn TaskApi>>,
    Viewer { session, gate }: Viewer,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    if gate::admin_access(&gate) != Access::Granted {
        return Ok(denied());
    }

    let Some(raw) = query.status else {
        let listing = mount(api.as_ref(), &session).await?;
        return Ok(render(&listing, StatusFilter::All, None));
    };

    let filter = raw.parse().unwrap_or_else(|_| {
        tracing::debug!(status = %raw, "unknown status filter, showing all");
        StatusFilter::All
    });
    let listing = current(api.as_ref(), &session).await?;
    Ok(render(&listing, filter, None))
}

/// `GET /Admin-dashboard/tasks/{task_id}/delete`
pub async fn confirm_delete(
    Viewer { session, gate }: Viewer,
    Path(task_id): Path<TaskId>,
) -> Result<Response, AppError> {
    if gate::admin_access(&gate) != Access::Granted {
        return Ok(denied());
    }

    let board = session.get::<AdminBoard>(ADMIN_VIEW).await?;
    let task = board.as_ref().and_then(|board| board.find(&task_id));
    Ok(pages::dashboards::confirm_delete(&task_id, task).into_response())
}

/// `POST /Admin-dashboard/tasks/{task_id}/delete`
///
/// A successful delete is followed by a full re-fetch; a failed one leaves
/// the copy as it was.
pub async fn delete(
    State(api): State<Arc<dyn TaskApi>>,
    Viewer { session, gate }: Viewer,
    Path(task_id): Path<TaskId>,
) -> Result<Response, AppError> {
    if gate::admin_access(&gate) != Access::Granted {
        return Ok(denied());
    }

    let (notice, listing) = match api.delete_task(&task_id).await {
        Ok(body) => {
            tracing::info!(task_id = %task_id, "task deleted");
            let notice = body.unwrap_or_else(|| DELETED.to_string());
            (notice, mount(api.as_ref(), &session).await?)
        }
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "task delete failed");
            let notice = format!("Error deleting task: {err}");
            (notice, current(api.as_ref(), &session).await?)
        }
    };

    Ok(render(&listing, StatusFilter::All, Some(&notice)))
}
