//! Global application error types and handlers.
//!
//! Remote-call failures are not represented here: each screen turns them into
//! its own error display. What remains are failures of the client itself
//! (session store, sign-in flow) and failures during startup.

use std::io;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskboard_adapters::{ApiError, IdentityError};
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::pages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session unavailable: {0}")]
    SessionUnavailable(&'static str),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(err) => err.into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    pages::error_page("Something went wrong", &other.to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Failures that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot build task API client: {0}")]
    Api(#[from] ApiError),

    #[error("cannot build identity provider client: {0}")]
    Identity(#[from] IdentityError),

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
