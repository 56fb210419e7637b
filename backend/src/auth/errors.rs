//! Custom error types specific to authentication failures.
//!
//! A failed sign-in never leaves the browser stranded: every variant renders
//! the sign-in screen again, with the reason shown above the button.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskboard_adapters::IdentityError;
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no sign-in is in progress")]
    NoPendingLogin,

    #[error("sign-in response did not match the request")]
    StateMismatch,

    #[error("sign-in response carried no authorization code")]
    MissingCode,

    #[error("sign-in was refused: {error}")]
    Denied {
        error: String,
        description: Option<String>,
    },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoPendingLogin | Self::StateMismatch | Self::MissingCode | Self::Denied { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Identity(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown on the sign-in screen.
    pub fn user_message(&self) -> String {
        match self {
            Self::Denied {
                description: Some(description),
                ..
            } => format!("Sign-in was refused: {description}"),
            Self::Identity(_) => "The identity provider could not be reached. Please try again.".into(),
            other => format!("Sign-in failed: {other}"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "authentication failed");
        (self.status_code(), pages::auth::sign_in(Some(&self.user_message()))).into_response()
    }
}
