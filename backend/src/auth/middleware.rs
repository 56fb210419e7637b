//! Extractors that load the routing gate from the browser's session.
//!
//! [`Viewer`] never rejects an identity state: it hands the handler whatever
//! the gate currently is, running the role lookup first if a freshly
//! authenticated session has not had one yet. [`SignedIn`] is for screens that need a session and
//! sends everyone else back to the root screen.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::models::{AuthSession, PendingLogin, RoleState, keys};
use super::service::AuthService;
use crate::errors::AppError;
use crate::services::gate::{self, Access, GateState};

/// The session and the gate state it describes.
pub struct Viewer {
    pub session: Session,
    pub gate: GateState,
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, reason)| AppError::SessionUnavailable(reason))?;

        let login_in_flight = session
            .get::<PendingLogin>(keys::PENDING_LOGIN)
            .await?
            .is_some();
        let user = session.get::<AuthSession>(keys::SESSION).await?;
        let role = session.get::<RoleState>(keys::ROLE).await?;

        let mut gate = GateState::observe(login_in_flight, user, role);
        if let GateState::Authenticated {
            session: user,
            role: RoleState::Pending,
        } = &gate
        {
            let user = user.clone();
            let role = AuthService::from_ref(state)
                .resolve_role(&session, &user)
                .await?;
            gate = gate.with_role(role);
        }

        Ok(Viewer { gate, session })
    }
}

/// An authenticated viewer, whatever its role.
pub struct SignedIn {
    pub session: Session,
    pub user: AuthSession,
}

impl<S> FromRequestParts<S> for SignedIn
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Viewer { session, gate } = Viewer::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match (gate::session_access(&gate), gate) {
            (Access::Granted, GateState::Authenticated { session: user, .. }) => {
                Ok(SignedIn { session, user })
            }
            _ => Err(Redirect::to(gate::ROOT).into_response()),
        }
    }
}
