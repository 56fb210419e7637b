//! Defines the HTTP routes of the task forms.

use axum::Router;
use axum::routing::get;

use super::handlers::{create, create_form, edit, edit_form};
use crate::AppState;
use crate::services::gate::{CREATE_TASK, EDIT_TASK};

pub fn tasks_router() -> Router<AppState> {
    Router::new()
        .route(CREATE_TASK, get(create_form).post(create))
        .route(EDIT_TASK, get(edit_form).post(edit))
}
