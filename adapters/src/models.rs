//! Data models shared by every adapter implementation.
//!
//! These models mirror the JSON shapes the remote task API emits and accepts,
//! so they can be handed straight to the backend screens and stored in
//! session view state without an intermediate mapping layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a task, as issued by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a user. For the signed-in user this is the `sub`
/// claim issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access token presented as a bearer credential. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Access level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

/// Progress of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    /// Any status string the API sends that is none of the above. Listed
    /// tasks still render; it is never offered or accepted as input.
    #[serde(rename = "Unknown", other)]
    Unknown,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A user as listed in a task's assignee set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "TaskId")]
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_to: Vec<Assignee>,
}

/// A user that can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "UserId")]
    pub id: UserId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

impl From<&User> for Assignee {
    fn from(user: &User) -> Self {
        Assignee {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Body of a task creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub status: TaskStatus,
    pub user_id: UserId,
    pub assigned_users: Vec<UserId>,
    pub assigned_names: Vec<Assignee>,
}

/// Body of a task update request. Assignees are left untouched by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub task_id: TaskId,
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub status: TaskStatus,
}

/// Parameters of one sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRequest {
    /// Anti-forgery value echoed back on the callback.
    pub state: String,
    /// S256 PKCE challenge derived from the verifier kept by the caller.
    pub code_challenge: String,
}

/// Claims read from the ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityTokens {
    pub access_token: BearerToken,
    pub claims: IdTokenClaims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_from_api_shape() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "TaskId": "t-1",
            "name": "Write report",
            "description": "Quarterly numbers",
            "dueDate": "2024-05-01",
            "status": "In Progress",
            "assigned_to": [{ "id": "u-1", "name": "Ada", "email": "ada@example.com" }]
        }))
        .unwrap();

        assert_eq!(task.id.as_str(), "t-1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.assigned_to[0].name, "Ada");
    }

    #[test]
    fn task_tolerates_missing_assignees_and_due_date() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "TaskId": "t-2",
            "name": "Bare",
            "status": "Pending"
        }))
        .unwrap();

        assert!(task.assigned_to.is_empty());
        assert!(task.due_date.is_empty());
    }

    #[test]
    fn new_task_serializes_camel_case() {
        let user = User {
            id: UserId::new("u-1"),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        let body = NewTask {
            name: "n".into(),
            description: "d".into(),
            due_date: "2024-01-01".into(),
            status: TaskStatus::Pending,
            user_id: UserId::new("admin"),
            assigned_users: vec![user.id.clone()],
            assigned_names: vec![Assignee::from(&user)],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["dueDate"], "2024-01-01");
        assert_eq!(value["userId"], "admin");
        assert_eq!(value["assignedUsers"][0], "u-1");
        assert_eq!(value["assignedNames"][0]["email"], "ada@example.com");
    }

    #[test]
    fn status_parses_display_names() {
        assert_eq!("In Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("Done".parse::<TaskStatus>().is_err());
        assert!("Unknown".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn unrecognised_status_deserializes_as_unknown() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "TaskId": "t-3",
            "name": "Odd",
            "status": "Blocked"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);

        // Survives the trip through a stored view copy.
        let stored = serde_json::to_value(&task).unwrap();
        let back: Task = serde_json::from_value(stored).unwrap();
        assert_eq!(back.status, TaskStatus::Unknown);
    }

    #[test]
    fn bearer_token_debug_is_redacted() {
        let token = BearerToken::new("very-secret");
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}
