//! Core business logic for the authentication system.
//!
//! This service runs the redirect login against the identity provider,
//! records the resulting identity in the browser's session, resolves the
//! user's role from the task API, and tears the session down on sign-out.

use std::sync::Arc;

use taskboard_adapters::pkce::{PkceCodes, generate_state};
use taskboard_adapters::{ApiError, AuthorizeRequest, IdentityProvider, TaskApi};
use tower_sessions::Session;
use url::Url;

use super::errors::AuthError;
use super::models::{AuthSession, CallbackParams, PendingLogin, RoleState, keys};
use crate::services::boards::{ADMIN_VIEW, MEMBER_VIEW};
use crate::services::forms::CREATE_VIEW;

const ROLE_NOT_FOUND: &str = "User details not found";

#[derive(Clone)]
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    api: Arc<dyn TaskApi>,
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>, api: Arc<dyn TaskApi>) -> Self {
        Self { identity, api }
    }

    /// Start a login: remember the PKCE verifier and `state`, and return the
    /// provider URL to send the browser to.
    pub async fn begin_login(&self, session: &Session) -> Result<Url, AuthError> {
        let pkce = PkceCodes::generate();
        let state = generate_state();

        let url = self
            .identity
            .authorize_url(&AuthorizeRequest {
                state: state.clone(),
                code_challenge: pkce.challenge,
            })
            .await?;

        session
            .insert(
                keys::PENDING_LOGIN,
                PendingLogin {
                    state,
                    code_verifier: pkce.verifier,
                },
            )
            .await?;

        Ok(url)
    }

    /// Finish a login from the provider's callback.
    ///
    /// The pending login is consumed whatever the outcome, so a callback can
    /// be used at most once. On success the session id is rotated and the
    /// new identity starts with its role unresolved.
    pub async fn complete_login(
        &self,
        session: &Session,
        params: CallbackParams,
    ) -> Result<AuthSession, AuthError> {
        let pending: PendingLogin = session
            .remove(keys::PENDING_LOGIN)
            .await?
            .ok_or(AuthError::NoPendingLogin)?;

        if let Some(error) = params.error {
            return Err(AuthError::Denied {
                error,
                description: params.error_description,
            });
        }

        if params.state.as_deref() != Some(pending.state.as_str()) {
            return Err(AuthError::StateMismatch);
        }

        let code = params
            .code
            .filter(|code| !code.is_empty())
            .ok_or(AuthError::MissingCode)?;

        let tokens = self
            .identity
            .exchange_code(&code, &pending.code_verifier)
            .await?;

        let user = AuthSession {
            user_id: tokens.claims.sub,
            access_token: tokens.access_token,
            email: tokens.claims.email,
        };

        session.cycle_id().await?;
        for key in [ADMIN_VIEW, MEMBER_VIEW, CREATE_VIEW] {
            session.remove_value(key).await?;
        }
        session.insert(keys::SESSION, &user).await?;
        session.insert(keys::ROLE, RoleState::Pending).await?;

        tracing::info!(user_id = %user.user_id, "signed in");
        Ok(user)
    }

    /// Look up the role for `user` once and record the outcome, success or
    /// failure, in the session. Nothing retries a failed lookup; the next
    /// login starts a fresh one.
    pub async fn resolve_role(&self, session: &Session, user: &AuthSession) -> Result<RoleState, AuthError> {
        let role = resolve_role(self.api.as_ref(), user).await;
        session.insert(keys::ROLE, &role).await?;
        Ok(role)
    }

    /// Drop the local session and return the provider logout URL.
    pub async fn sign_out(&self, session: &Session) -> Result<Url, AuthError> {
        session.flush().await?;
        let url = self.identity.logout_url().await?;
        tracing::info!("signed out");
        Ok(url)
    }
}

/// One role lookup for an authenticated user.
pub async fn resolve_role(api: &dyn TaskApi, user: &AuthSession) -> RoleState {
    match api.get_user_role(&user.user_id, &user.access_token).await {
        Ok(role) => {
            tracing::info!(user_id = %user.user_id, role = role.as_str(), "role resolved");
            RoleState::Resolved(role)
        }
        Err(err) => {
            tracing::warn!(user_id = %user.user_id, error = %err, "role lookup failed");
            RoleState::Failed(role_error_message(&err))
        }
    }
}

fn role_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { .. } => ROLE_NOT_FOUND.to_string(),
        other => other.to_string(),
    }
}
