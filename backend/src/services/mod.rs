//! Module for the client's screen logic.
//!
//! This module holds everything the screens decide without talking to the
//! network: the routing gate, the dashboards' view state and the task forms.
//! Handlers in `api` and `auth` feed it fetched data and render the result.

pub mod boards;
pub mod forms;
pub mod gate;
