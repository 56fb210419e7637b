//! Defines the HTTP routes of the member dashboard.

use axum::Router;
use axum::routing::{get, post};

use super::handlers::{dashboard, set_status};
use crate::AppState;
use crate::services::gate::MEMBER_DASHBOARD;

const SET_STATUS: &str = "/member-dashboard/tasks/{task_id}/status";

pub fn member_router() -> Router<AppState> {
    Router::new()
        .route(MEMBER_DASHBOARD, get(dashboard))
        .route(SET_STATUS, post(set_status))
}
