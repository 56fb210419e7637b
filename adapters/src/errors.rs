//! Custom error types specific to the `adapters` crate.
//!
//! Remote-call failures fall in exactly two classes: the request never
//! produced a usable body (network or decoding failure), or the API answered
//! with a non-success status. Screens only need to tell those apart.

use thiserror::Error;

use crate::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the JSON shape the endpoint promises.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The API answered with a non-success status.
    #[error("{endpoint} failed with status {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        /// `message` field of the error body, when the API sent one.
        message: Option<String>,
    },
}

impl ApiError {
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }

    /// Message supplied by the API in the error body, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider discovery failed: {0}")]
    Discovery(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
pub type IdentityResult<T> = Result<T, IdentityError>;
