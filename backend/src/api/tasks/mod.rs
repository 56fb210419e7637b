//! Module for the create-task and edit-task forms.
//!
//! Both forms check required fields before calling the API and send the
//! live session's bearer token with the request.

pub mod handlers;
pub mod routes;
