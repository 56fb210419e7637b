//! Data structures for authentication-related entities.
//!
//! This module defines what the login flow keeps in the browser's session:
//! the in-flight login, the authenticated identity, and the state of the
//! role lookup for that identity.

use serde::{Deserialize, Serialize};
use taskboard_adapters::{BearerToken, Role, UserId};

/// The authenticated identity obtained from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: UserId,
    pub access_token: BearerToken,
    #[serde(default)]
    pub email: Option<String>,
}

/// A login redirect that has been started but not completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    pub state: String,
    pub code_verifier: String,
}

/// Outcome of the role lookup for the current [`AuthSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleState {
    /// Authenticated, lookup not run yet.
    Pending,
    Resolved(Role),
    /// Lookup failed; carries the message shown to the user.
    Failed(String),
}

/// Query parameters the identity provider appends to the callback URL.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Session keys for authentication data.
pub mod keys {
    pub const PENDING_LOGIN: &str = "auth.pending";
    pub const SESSION: &str = "auth.session";
    pub const ROLE: &str = "auth.role";
}
