//! Module for the member dashboard.
//!
//! A signed-in user sees the tasks assigned to them and moves each one
//! between statuses.

pub mod handlers;
pub mod routes;
