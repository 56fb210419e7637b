//! Defines the HTTP routes of the admin dashboard.

use axum::Router;
use axum::routing::get;

use super::handlers::{confirm_delete, dashboard, delete};
use crate::AppState;
use crate::services::gate::ADMIN_DASHBOARD;

const DELETE_TASK: &str = "/Admin-dashboard/tasks/{task_id}/delete";

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(ADMIN_DASHBOARD, get(dashboard))
        .route(DELETE_TASK, get(confirm_delete).post(delete))
}
