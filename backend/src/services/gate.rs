//! The routing gate: what a path renders for the current identity.
//!
//! The gate moves through `Unresolved -> Unauthenticated | Authenticated`,
//! and an authenticated gate is further split once the role lookup
//! completes. Nothing here performs I/O; the session extractor builds a
//! [`GateState`] and runs the role lookup while it is pending, and handlers
//! render whatever the decision functions return.

use taskboard_adapters::{Role, TaskId};

use crate::auth::{AuthSession, RoleState};

pub const ROOT: &str = "/";
pub const ADMIN_DASHBOARD: &str = "/Admin-dashboard";
pub const MEMBER_DASHBOARD: &str = "/member-dashboard";
pub const CREATE_TASK: &str = "/create-task";
pub const EDIT_TASK: &str = "/edit-task/{task_id}";

/// Screens the gate redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    AdminDashboard,
    MemberDashboard,
    EditTask(TaskId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::AdminDashboard => ADMIN_DASHBOARD.to_string(),
            Route::MemberDashboard => MEMBER_DASHBOARD.to_string(),
            Route::EditTask(id) => format!("/edit-task/{}", crate::pages::encode_segment(id.as_str())),
        }
    }

    /// Dashboard a resolved role lands on.
    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::User => Route::MemberDashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// A login redirect is in flight; authentication status is not known yet.
    Unresolved,
    Unauthenticated,
    Authenticated { session: AuthSession, role: RoleState },
}

impl GateState {
    /// Build the gate from what the session holds.
    pub fn observe(
        login_in_flight: bool,
        session: Option<AuthSession>,
        role: Option<RoleState>,
    ) -> Self {
        match session {
            Some(session) => GateState::Authenticated {
                session,
                role: role.unwrap_or(RoleState::Pending),
            },
            None if login_in_flight => GateState::Unresolved,
            None => GateState::Unauthenticated,
        }
    }

    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            GateState::Authenticated { session, .. } => Some(session),
            _ => None,
        }
    }

    /// The role, once the lookup has succeeded.
    pub fn role(&self) -> Option<Role> {
        match self {
            GateState::Authenticated {
                role: RoleState::Resolved(role),
                ..
            } => Some(*role),
            _ => None,
        }
    }

    /// Transition after the role lookup completed. Only meaningful while
    /// authenticated; any other state is returned unchanged.
    pub fn with_role(self, role: RoleState) -> Self {
        match self {
            GateState::Authenticated { session, .. } => GateState::Authenticated { session, role },
            other => other,
        }
    }
}

/// What the root screen does for a gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    /// Authentication status not known yet.
    Loading,
    SignIn,
    /// Authenticated, role unknown: run the lookup, then decide again.
    ResolveRole,
    Redirect(Route),
    RoleError(String),
}

pub fn landing(state: &GateState) -> Landing {
    match state {
        GateState::Unresolved => Landing::Loading,
        GateState::Unauthenticated => Landing::SignIn,
        GateState::Authenticated { role, .. } => match role {
            RoleState::Pending => Landing::ResolveRole,
            RoleState::Resolved(role) => Landing::Redirect(Route::dashboard_for(*role)),
            RoleState::Failed(message) => Landing::RoleError(message.clone()),
        },
    }
}

/// What a non-root screen does for a gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Render the non-navigating placeholder.
    Placeholder,
    /// Send the browser to the root screen, which applies the gate again.
    SignInRequired,
}

/// The admin dashboard renders only for a resolved `Admin` role. Every other
/// state, including a role still being looked up, gets the placeholder.
pub fn admin_access(state: &GateState) -> Access {
    match state.role() {
        Some(Role::Admin) => Access::Granted,
        _ => Access::Placeholder,
    }
}

/// Member and form screens need an authenticated session, whatever the role.
pub fn session_access(state: &GateState) -> Access {
    match state {
        GateState::Authenticated { .. } => Access::Granted,
        _ => Access::SignInRequired,
    }
}

#[cfg(test)]
mod tests {
    use taskboard_adapters::{BearerToken, UserId};

    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            user_id: UserId::new("sub-1"),
            access_token: BearerToken::new("token"),
            email: None,
        }
    }

    fn authenticated(role: RoleState) -> GateState {
        GateState::observe(false, Some(session()), Some(role))
    }

    #[test]
    fn observe_distinguishes_in_flight_login() {
        assert_eq!(GateState::observe(true, None, None), GateState::Unresolved);
        assert_eq!(GateState::observe(false, None, None), GateState::Unauthenticated);
        // An established session wins over a stale in-flight login.
        assert!(matches!(
            GateState::observe(true, Some(session()), None),
            GateState::Authenticated {
                role: RoleState::Pending,
                ..
            }
        ));
    }

    #[test]
    fn unauthenticated_lands_on_sign_in() {
        assert_eq!(landing(&GateState::Unauthenticated), Landing::SignIn);
        assert_eq!(landing(&GateState::Unresolved), Landing::Loading);
    }

    #[test]
    fn landing_follows_resolved_role() {
        assert_eq!(
            landing(&authenticated(RoleState::Resolved(Role::Admin))),
            Landing::Redirect(Route::AdminDashboard)
        );
        assert_eq!(
            landing(&authenticated(RoleState::Resolved(Role::User))),
            Landing::Redirect(Route::MemberDashboard)
        );
        assert_eq!(
            landing(&authenticated(RoleState::Pending)),
            Landing::ResolveRole
        );
        assert_eq!(
            landing(&authenticated(RoleState::Failed("User details not found".into()))),
            Landing::RoleError("User details not found".into())
        );
    }

    #[test]
    fn admin_content_only_for_admin_role() {
        let states = [
            GateState::Unresolved,
            GateState::Unauthenticated,
            authenticated(RoleState::Pending),
            authenticated(RoleState::Resolved(Role::User)),
            authenticated(RoleState::Failed("boom".into())),
        ];
        for state in &states {
            assert_eq!(admin_access(state), Access::Placeholder, "{state:?}");
        }

        assert_eq!(
            admin_access(&authenticated(RoleState::Resolved(Role::Admin))),
            Access::Granted
        );
    }

    #[test]
    fn session_screens_require_authentication() {
        assert_eq!(session_access(&GateState::Unauthenticated), Access::SignInRequired);
        assert_eq!(session_access(&GateState::Unresolved), Access::SignInRequired);
        assert_eq!(
            session_access(&authenticated(RoleState::Pending)),
            Access::Granted
        );
    }

    #[test]
    fn with_role_only_changes_authenticated_state() {
        let resolved = authenticated(RoleState::Pending).with_role(RoleState::Resolved(Role::User));
        assert_eq!(resolved.role(), Some(Role::User));

        assert_eq!(
            GateState::Unauthenticated.with_role(RoleState::Resolved(Role::Admin)),
            GateState::Unauthenticated
        );
    }

    #[test]
    fn edit_route_encodes_task_id() {
        assert_eq!(
            Route::EditTask(TaskId::new("a b/c")).path(),
            "/edit-task/a%20b%2Fc"
        );
    }
}
