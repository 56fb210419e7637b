//! HTTP implementation of [`TaskApi`] for the remote task API.
//!
//! Each endpoint is a path segment under one base URL. Responses are JSON
//! envelopes (`{ "tasks": [...] }`, `{ "task": {...} }`, ...) which are
//! unwrapped here so callers only ever see the models.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::errors::{ApiError, ApiResult};
use crate::models::{BearerToken, NewTask, Role, Task, TaskId, TaskStatus, TaskUpdate, User, UserId};
use crate::{Endpoint, TaskApi};

#[derive(Deserialize)]
struct RoleEnvelope {
    #[serde(rename = "Role")]
    role: Role,
}

#[derive(Deserialize)]
struct TasksEnvelope {
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: Task,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Option<Vec<User>>,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct DeleteEnvelope {
    #[serde(default)]
    body: Option<String>,
}

/// [`TaskApi`] over HTTP+JSON.
#[derive(Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: Url,
}

impl HttpTaskApi {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // `Url::join` drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { client, base_url }
    }

    fn url(&self, endpoint: Endpoint) -> ApiResult<Url> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| ApiError::Network(format!("invalid url for {endpoint}: {e}")))
    }

    async fn send(&self, endpoint: Endpoint, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        log::debug!("{endpoint} answered {status}");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageEnvelope>(&text)
            .ok()
            .and_then(|body| body.message);

        log::warn!("{endpoint} failed with status {status}");

        Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(endpoint: Endpoint, response: Response) -> ApiResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))
    }

    /// Like [`Self::decode`], but a success with an empty or non-JSON body is
    /// not an error.
    async fn decode_lenient<T: DeserializeOwned>(endpoint: Endpoint, response: Response) -> Option<T> {
        let bytes = response.bytes().await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("{endpoint} returned an unreadable success body: {e}");
                None
            }
        }
    }
}

fn bearer(token: &BearerToken) -> String {
    format!("Bearer {}", token.secret())
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn get_user_role(&self, user_id: &UserId, token: &BearerToken) -> ApiResult<Role> {
        let endpoint = Endpoint::GetUser;
        let request = self
            .client
            .get(self.url(endpoint)?)
            .query(&[("id", user_id.as_str())])
            .header(AUTHORIZATION, bearer(token));

        let response = self.send(endpoint, request).await?;
        let body: RoleEnvelope = Self::decode(endpoint, response).await?;
        Ok(body.role)
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let endpoint = Endpoint::GetAllTasks;
        let request = self.client.get(self.url(endpoint)?);

        let response = self.send(endpoint, request).await?;
        let body: TasksEnvelope = Self::decode(endpoint, response).await?;
        Ok(body.tasks.unwrap_or_default())
    }

    async fn list_tasks_for_user(&self, user_id: &UserId) -> ApiResult<Vec<Task>> {
        let endpoint = Endpoint::GetTaskByUserId;
        let request = self
            .client
            .get(self.url(endpoint)?)
            .query(&[("UserId", user_id.as_str())]);

        let response = self.send(endpoint, request).await?;
        let body: TasksEnvelope = Self::decode(endpoint, response).await?;
        Ok(body.tasks.unwrap_or_default())
    }

    async fn get_task(&self, task_id: &TaskId) -> ApiResult<Task> {
        let endpoint = Endpoint::GetTaskById;
        let request = self
            .client
            .post(self.url(endpoint)?)
            .json(&json!({ "taskId": task_id }));

        let response = self.send(endpoint, request).await?;
        let body: TaskEnvelope = Self::decode(endpoint, response).await?;
        Ok(body.task)
    }

    async fn create_task(&self, task: &NewTask, token: &BearerToken) -> ApiResult<Option<String>> {
        let endpoint = Endpoint::CreateTask;
        let request = self
            .client
            .post(self.url(endpoint)?)
            .header(AUTHORIZATION, bearer(token))
            .json(task);

        let response = self.send(endpoint, request).await?;
        Ok(Self::decode_lenient::<MessageEnvelope>(endpoint, response)
            .await
            .and_then(|body| body.message))
    }

    async fn update_task(&self, update: &TaskUpdate, token: &BearerToken) -> ApiResult<()> {
        let endpoint = Endpoint::UpdateTask;
        let request = self
            .client
            .patch(self.url(endpoint)?)
            .header(AUTHORIZATION, bearer(token))
            .json(update);

        self.send(endpoint, request).await?;
        Ok(())
    }

    async fn set_task_status(&self, task_id: &TaskId, status: TaskStatus) -> ApiResult<()> {
        let endpoint = Endpoint::SetTaskStatus;
        let request = self
            .client
            .post(self.url(endpoint)?)
            .json(&json!({ "taskId": task_id, "status": status }));

        // Only a plain 200 counts as applied.
        let response = self.send(endpoint, request).await?;
        if response.status() != StatusCode::OK {
            return Err(ApiError::Status {
                endpoint,
                status: response.status().as_u16(),
                message: None,
            });
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: &TaskId) -> ApiResult<Option<String>> {
        let endpoint = Endpoint::DeleteTaskById;
        let request = self
            .client
            .delete(self.url(endpoint)?)
            .json(&json!({ "taskId": task_id }));

        let response = self.send(endpoint, request).await?;
        Ok(Self::decode_lenient::<DeleteEnvelope>(endpoint, response)
            .await
            .and_then(|body| body.body))
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let endpoint = Endpoint::GetAllUsers;
        let request = self.client.get(self.url(endpoint)?);

        let response = self.send(endpoint, request).await?;
        let body: UsersEnvelope = Self::decode(endpoint, response).await?;
        Ok(body.users.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let api = HttpTaskApi::with_client(
            Client::new(),
            Url::parse("https://api.example.com/Prod").unwrap(),
        );

        assert_eq!(
            api.url(Endpoint::GetAllTasks).unwrap().as_str(),
            "https://api.example.com/Prod/getAllTasks"
        );
    }

    #[test]
    fn base_url_with_slash_is_kept() {
        let api = HttpTaskApi::with_client(
            Client::new(),
            Url::parse("https://api.example.com/Prod/").unwrap(),
        );

        assert_eq!(
            api.url(Endpoint::DeleteTaskById).unwrap().as_str(),
            "https://api.example.com/Prod/deleteTaskById"
        );
    }
}
