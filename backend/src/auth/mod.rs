//! Authentication module for the redirect login, the session it leaves
//! behind, and the role lookup that decides where a user may go.
//!
//! This module provides the root screen, the login/callback/logout
//! endpoints, and the extractors screens use to read the routing gate.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::AuthError;
pub use middleware::{SignedIn, Viewer};
pub use models::{AuthSession, CallbackParams, PendingLogin, RoleState};
pub use routes::auth_router;
pub use service::AuthService;
