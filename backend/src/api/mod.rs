//! Central module for organizing the application's screens.
//!
//! This module acts as a top-level container for the dashboards and the
//! task forms, excluding the root screen and the login flow which are
//! handled by `auth`.

use axum::Router;

use crate::AppState;

pub mod admin;
pub mod member;
pub mod tasks;

pub fn screens_router() -> Router<AppState> {
    Router::new()
        .merge(admin::routes::admin_router())
        .merge(member::routes::member_router())
        .merge(tasks::routes::tasks_router())
}
