//! Core `adapters` crate for abstracting the taskboard's remote collaborators.
//!
//! This crate defines the `TaskApi` trait, which outlines every call the web
//! client makes against the remote task API, and the `IdentityProvider` trait
//! for the redirect-based login. Concrete implementations live in their own
//! modules: `http` and `oidc` talk to the real services, `memory` keeps
//! everything in-process for tests.

use std::fmt;

use async_trait::async_trait;
use url::Url;

pub mod errors;
pub mod http;
pub mod models;
pub mod oidc;
pub mod pkce;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use errors::{ApiError, ApiResult, IdentityError, IdentityResult};
pub use models::*;

/// Remote API endpoints, named by the path segment appended to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetUser,
    GetAllTasks,
    GetTaskByUserId,
    GetTaskById,
    CreateTask,
    UpdateTask,
    SetTaskStatus,
    DeleteTaskById,
    GetAllUsers,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::GetUser => "getUser",
            Endpoint::GetAllTasks => "getAllTasks",
            Endpoint::GetTaskByUserId => "getTaskByUserId",
            Endpoint::GetTaskById => "getTaskById",
            Endpoint::CreateTask => "createTask",
            Endpoint::UpdateTask => "updateTask",
            Endpoint::SetTaskStatus => "setTaskStatus",
            Endpoint::DeleteTaskById => "deleteTaskById",
            Endpoint::GetAllUsers => "getAllUsers",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Every call the web client makes against the remote task API.
///
/// Calls that take a [`BearerToken`] are sent with an `Authorization` header;
/// the others are sent anonymously, as the API expects.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET getUser?id=` and return the `Role` field.
    async fn get_user_role(&self, user_id: &UserId, token: &BearerToken) -> ApiResult<Role>;

    /// `GET getAllTasks`.
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// `GET getTaskByUserId?UserId=`.
    async fn list_tasks_for_user(&self, user_id: &UserId) -> ApiResult<Vec<Task>>;

    /// `POST getTaskById`.
    async fn get_task(&self, task_id: &TaskId) -> ApiResult<Task>;

    /// `POST createTask`; returns the confirmation message if the API sent one.
    async fn create_task(&self, task: &NewTask, token: &BearerToken) -> ApiResult<Option<String>>;

    /// `PATCH updateTask`.
    async fn update_task(&self, update: &TaskUpdate, token: &BearerToken) -> ApiResult<()>;

    /// `POST setTaskStatus`.
    async fn set_task_status(&self, task_id: &TaskId, status: TaskStatus) -> ApiResult<()>;

    /// `DELETE deleteTaskById`; returns the `body` message if the API sent one.
    async fn delete_task(&self, task_id: &TaskId) -> ApiResult<Option<String>>;

    /// `GET getAllUsers`.
    async fn list_users(&self) -> ApiResult<Vec<User>>;
}

/// The redirect-based login collaborator.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to sign in.
    async fn authorize_url(&self, request: &AuthorizeRequest) -> IdentityResult<Url>;

    /// Trade the authorization code from the callback for tokens.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> IdentityResult<IdentityTokens>;

    /// URL the browser is sent to after the local session is dropped.
    async fn logout_url(&self) -> IdentityResult<Url>;
}
