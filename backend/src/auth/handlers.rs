//! Handler functions for the root screen and the login flow.
//!
//! The root screen is where the gate is applied: it prompts for sign-in or
//! sends the browser on to the dashboard its role allows. The role lookup
//! itself runs in the [`Viewer`] extractor, so it happens on whichever screen
//! a new session reaches first.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::errors::AuthError;
use super::middleware::Viewer;
use super::models::CallbackParams;
use super::service::AuthService;
use crate::pages;
use crate::services::gate::{self, Landing};

/// `GET /`
pub async fn landing(Viewer { gate, .. }: Viewer) -> Response {
    match gate::landing(&gate) {
        Landing::Loading => pages::auth::signing_in().into_response(),
        Landing::SignIn => pages::auth::sign_in(None).into_response(),
        Landing::Redirect(route) => Redirect::to(&route.path()).into_response(),
        Landing::RoleError(message) => pages::auth::role_error(&message).into_response(),
        // The extractor has already run the lookup.
        Landing::ResolveRole => pages::auth::placeholder().into_response(),
    }
}

/// `GET /login`
pub async fn login(State(auth): State<AuthService>, session: Session) -> Result<Redirect, AuthError> {
    let url = auth.begin_login(&session).await?;
    tracing::debug!("redirecting to identity provider");
    Ok(Redirect::to(url.as_str()))
}

/// `GET /auth/callback`
pub async fn callback(
    State(auth): State<AuthService>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AuthError> {
    auth.complete_login(&session, params).await?;
    Ok(Redirect::to(gate::ROOT))
}

/// `POST /logout`
pub async fn logout(State(auth): State<AuthService>, session: Session) -> Result<Redirect, AuthError> {
    let url = auth.sign_out(&session).await?;
    Ok(Redirect::to(url.as_str()))
}
