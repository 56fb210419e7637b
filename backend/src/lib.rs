//! Taskboard web client.
//!
//! A server-rendered front end for the remote task API: users sign in
//! through the identity provider, their role is looked up once, and the
//! router sends admins to the admin dashboard and everyone else to the
//! member dashboard.

use std::sync::Arc;

use axum::Router;
use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_sessions::SessionManagerLayer;
use tower_sessions_moka_store::MokaStore;

use taskboard_adapters::{IdentityProvider, TaskApi};

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod pages;
pub mod services;

pub use auth::AuthService;
pub use errors::{AppError, StartupError};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TaskApi>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(api: Arc<dyn TaskApi>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            auth: AuthService::new(identity, api.clone()),
            api,
        }
    }
}

impl FromRef<AppState> for Arc<dyn TaskApi> {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// The full application router.
pub fn app(state: AppState, sessions: SessionManagerLayer<MokaStore>) -> Router {
    Router::new()
        .merge(auth::auth_router())
        .merge(api::screens_router())
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(sessions)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, pages::not_found())
}
