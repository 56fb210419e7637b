//! Defines the HTTP routes for the root screen and the login flow.

use axum::Router;
use axum::routing::{get, post};

use super::handlers::{callback, landing, login, logout};
use crate::AppState;
use crate::services::gate::ROOT;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route(ROOT, get(landing))
        .route("/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/logout", post(logout))
}
