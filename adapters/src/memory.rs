//! In-process collaborators backed by plain collections.
//!
//! `InMemoryTaskApi` behaves like the remote task API for a single process,
//! records which endpoints were called and can be told to fail an endpoint
//! with a given status. `StaticIdentityProvider` hands out pre-registered
//! tokens for authorization codes and checks the PKCE verifier.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use url::Url;

use crate::errors::{ApiError, ApiResult, IdentityError, IdentityResult};
use crate::models::{
    AuthorizeRequest, BearerToken, IdentityTokens, NewTask, Role, Task, TaskId, TaskStatus,
    TaskUpdate, User, UserId,
};
use crate::pkce::challenge_for;
use crate::{Endpoint, IdentityProvider, TaskApi};

#[derive(Default)]
struct State {
    roles: HashMap<UserId, Role>,
    tasks: Vec<Task>,
    users: Vec<User>,
    failures: HashMap<Endpoint, u16>,
    calls: Vec<Endpoint>,
    bearer_tokens: Vec<(Endpoint, String)>,
    next_id: u64,
}

#[derive(Default)]
pub struct InMemoryTaskApi {
    state: Mutex<State>,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(self, user_id: &str, role: Role) -> Self {
        self.lock().roles.insert(UserId::new(user_id), role);
        self
    }

    pub fn with_task(self, task: Task) -> Self {
        self.lock().tasks.push(task);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.lock().users.push(user);
        self
    }

    /// Make every call to `endpoint` answer `status` until cleared.
    pub fn fail(&self, endpoint: Endpoint, status: u16) {
        self.lock().failures.insert(endpoint, status);
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.lock().failures.remove(&endpoint);
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.lock().calls.iter().filter(|&&c| c == endpoint).count()
    }

    /// Bearer tokens presented so far, with the endpoint they were sent to.
    pub fn bearer_tokens(&self) -> Vec<(Endpoint, String)> {
        self.lock().bearer_tokens.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and apply any configured failure.
    fn enter(&self, endpoint: Endpoint, token: Option<&BearerToken>) -> ApiResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(endpoint);
        if let Some(token) = token {
            state
                .bearer_tokens
                .push((endpoint, token.secret().to_string()));
        }

        if let Some(&status) = state.failures.get(&endpoint) {
            return Err(ApiError::Status {
                endpoint,
                status,
                message: None,
            });
        }
        Ok(state)
    }
}

fn not_found(endpoint: Endpoint) -> ApiError {
    ApiError::Status {
        endpoint,
        status: 404,
        message: Some("not found".into()),
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn get_user_role(&self, user_id: &UserId, token: &BearerToken) -> ApiResult<Role> {
        let endpoint = Endpoint::GetUser;
        let state = self.enter(endpoint, Some(token))?;
        state
            .roles
            .get(user_id)
            .copied()
            .ok_or_else(|| not_found(endpoint))
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let state = self.enter(Endpoint::GetAllTasks, None)?;
        Ok(state.tasks.clone())
    }

    async fn list_tasks_for_user(&self, user_id: &UserId) -> ApiResult<Vec<Task>> {
        let state = self.enter(Endpoint::GetTaskByUserId, None)?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.assigned_to.iter().any(|a| &a.id == user_id))
            .cloned()
            .collect())
    }

    async fn get_task(&self, task_id: &TaskId) -> ApiResult<Task> {
        let endpoint = Endpoint::GetTaskById;
        let state = self.enter(endpoint, None)?;
        state
            .tasks
            .iter()
            .find(|task| &task.id == task_id)
            .cloned()
            .ok_or_else(|| not_found(endpoint))
    }

    async fn create_task(&self, task: &NewTask, token: &BearerToken) -> ApiResult<Option<String>> {
        let mut state = self.enter(Endpoint::CreateTask, Some(token))?;
        state.next_id += 1;
        let id = TaskId::new(format!("task-{}", state.next_id));
        state.tasks.push(Task {
            id,
            name: task.name.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            status: task.status,
            assigned_to: task.assigned_names.clone(),
        });
        Ok(Some("Task created".into()))
    }

    async fn update_task(&self, update: &TaskUpdate, token: &BearerToken) -> ApiResult<()> {
        let endpoint = Endpoint::UpdateTask;
        let mut state = self.enter(endpoint, Some(token))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == update.task_id)
            .ok_or_else(|| not_found(endpoint))?;

        task.name = update.name.clone();
        task.description = update.description.clone();
        task.due_date = update.due_date.clone();
        task.status = update.status;
        Ok(())
    }

    async fn set_task_status(&self, task_id: &TaskId, status: TaskStatus) -> ApiResult<()> {
        let endpoint = Endpoint::SetTaskStatus;
        let mut state = self.enter(endpoint, None)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| &task.id == task_id)
            .ok_or_else(|| not_found(endpoint))?;

        task.status = status;
        Ok(())
    }

    async fn delete_task(&self, task_id: &TaskId) -> ApiResult<Option<String>> {
        let endpoint = Endpoint::DeleteTaskById;
        let mut state = self.enter(endpoint, None)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| &task.id != task_id);
        if state.tasks.len() == before {
            return Err(not_found(endpoint));
        }
        Ok(Some(format!("Task {task_id} deleted")))
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let state = self.enter(Endpoint::GetAllUsers, None)?;
        Ok(state.users.clone())
    }
}

#[derive(Default)]
struct IdentityState {
    codes: HashMap<String, IdentityTokens>,
    challenges: Vec<String>,
}

/// Identity provider that trades registered codes for fixed tokens.
pub struct StaticIdentityProvider {
    base: Url,
    state: Mutex<IdentityState>,
}

impl StaticIdentityProvider {
    /// `base` stands in for the provider's host; authorize and logout URLs
    /// are built under it.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            state: Mutex::new(IdentityState::default()),
        }
    }

    /// Register the tokens returned for `code`.
    pub fn issue_code(&self, code: &str, tokens: IdentityTokens) {
        self.lock().codes.insert(code.to_string(), tokens);
    }

    fn lock(&self) -> MutexGuard<'_, IdentityState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn endpoint(&self, path: &str) -> IdentityResult<Url> {
        self.base
            .join(path)
            .map_err(|e| IdentityError::Discovery(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authorize_url(&self, request: &AuthorizeRequest) -> IdentityResult<Url> {
        self.lock().challenges.push(request.code_challenge.clone());

        let mut url = self.endpoint("authorize")?;
        url.query_pairs_mut()
            .append_pair("state", &request.state)
            .append_pair("code_challenge", &request.code_challenge);
        Ok(url)
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> IdentityResult<IdentityTokens> {
        let mut state = self.lock();
        let challenge = challenge_for(code_verifier);
        if !state.challenges.contains(&challenge) {
            return Err(IdentityError::TokenExchange("PKCE verification failed".into()));
        }

        state
            .codes
            .remove(code)
            .ok_or_else(|| IdentityError::TokenExchange("invalid_grant".into()))
    }

    async fn logout_url(&self) -> IdentityResult<Url> {
        self.endpoint("logout")
    }
}
