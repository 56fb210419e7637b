//! Module for the admin dashboard.
//!
//! This module lists every task for an admin, filters the fetched copy by
//! status, and deletes tasks. It renders nothing but a placeholder unless
//! the viewer's role resolved to `Admin`.

pub mod handlers;
pub mod routes;
