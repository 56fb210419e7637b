//! Handler functions for the task forms.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use taskboard_adapters::{ApiError, TaskApi, TaskId};

use crate::auth::SignedIn;
use crate::errors::AppError;
use crate::pages;
use crate::pages::forms::CreatePage;
use crate::services::forms::{CREATE_VIEW, CreateScreen, CreateTaskForm, EditTaskForm, TaskFields};
use crate::services::gate::ADMIN_DASHBOARD;

const USERS_FAILED: &str = "An error occurred while fetching users";
const CREATED: &str = "Task created successfully";
const CREATE_FAILED: &str = "Failed to create task";
const TASK_FAILED: &str = "An error occurred while fetching the task details.";
const UPDATE_FAILED: &str = "An error occurred while updating the task.";

/// Message shown when the creation request fails.
fn create_failure(err: &ApiError) -> String {
    match err.api_message() {
        Some(message) => message.to_string(),
        None if err.is_status() => CREATE_FAILED.to_string(),
        None => err.to_string(),
    }
}

/// `GET /create-task`
pub async fn create_form(
    State(api): State<Arc<dyn TaskApi>>,
    SignedIn { session, .. }: SignedIn,
) -> Result<Response, AppError> {
    let (screen, error) = match api.list_users().await {
        Ok(users) => (CreateScreen { users }, None),
        Err(err) => {
            tracing::warn!(error = %err, "user listing failed");
            (CreateScreen::default(), Some(USERS_FAILED))
        }
    };
    session.insert(CREATE_VIEW, &screen).await?;

    Ok(pages::forms::create(CreatePage {
        fields: &TaskFields::default(),
        users: &screen.users,
        selected: &[],
        error,
        outcome: None,
    })
    .into_response())
}

/// `POST /create-task`
///
/// Uses the user list fetched when the form was opened; users are never
/// re-fetched on submit.
pub async fn create(
    State(api): State<Arc<dyn TaskApi>>,
    SignedIn { session, user }: SignedIn,
    body: Bytes,
) -> Result<Response, AppError> {
    let screen = session
        .get::<CreateScreen>(CREATE_VIEW)
        .await?
        .unwrap_or_default();
    let form = CreateTaskForm::parse(&body);

    let Some(task) = form.to_new_task(&screen.users, &user.user_id) else {
        let message = form.fields.validation_message().unwrap_or_default();
        return Ok(pages::forms::create(CreatePage {
            fields: &form.fields,
            users: &screen.users,
            selected: &form.selected,
            error: Some(&message),
            outcome: None,
        })
        .into_response());
    };

    let page = match api.create_task(&task, &user.access_token).await {
        Ok(message) => {
            tracing::info!(name = %task.name, assignees = task.assigned_users.len(), "task created");
            let outcome = message.unwrap_or_else(|| CREATED.to_string());
            pages::forms::create(CreatePage {
                fields: &TaskFields::default(),
                users: &screen.users,
                selected: &[],
                error: None,
                outcome: Some(&outcome),
            })
        }
        Err(err) => {
            tracing::warn!(error = %err, "task creation failed");
            let outcome = create_failure(&err);
            pages::forms::create(CreatePage {
                fields: &form.fields,
                users: &screen.users,
                selected: &form.selected,
                error: None,
                outcome: Some(&outcome),
            })
        }
    };
    Ok(page.into_response())
}

/// `GET /edit-task/{task_id}`
///
/// A failed fetch leaves every field at its initial value.
pub async fn edit_form(
    State(api): State<Arc<dyn TaskApi>>,
    _signed_in: SignedIn,
    Path(task_id): Path<TaskId>,
) -> Response {
    let (fields, error) = match api.get_task(&task_id).await {
        Ok(task) => (TaskFields::from_task(&task), None),
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "task fetch failed");
            (TaskFields::default(), Some(TASK_FAILED))
        }
    };
    pages::forms::edit(&task_id, &fields, error).into_response()
}

/// `POST /edit-task/{task_id}`
pub async fn edit(
    State(api): State<Arc<dyn TaskApi>>,
    SignedIn { user, .. }: SignedIn,
    Path(task_id): Path<TaskId>,
    body: Bytes,
) -> Response {
    let form = EditTaskForm::parse(&body);

    let Some(update) = form.to_update(&task_id) else {
        let message = form.fields.validation_message().unwrap_or_default();
        return pages::forms::edit(&task_id, &form.fields, Some(&message)).into_response();
    };

    match api.update_task(&update, &user.access_token).await {
        Ok(()) => {
            tracing::info!(task_id = %task_id, "task updated");
            Redirect::to(ADMIN_DASHBOARD).into_response()
        }
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "task update failed");
            pages::forms::edit(&task_id, &form.fields, Some(UPDATE_FAILED)).into_response()
        }
    }
}
