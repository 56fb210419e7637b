//! General-purpose middleware for the web client.
//!
//! Request logging for every route and the cookie session layer the gate
//! and the per-screen view copies live in.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

pub const SESSION_COOKIE: &str = "taskboard.sid";

/// Log method, path, status and latency of each request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

/// In-memory sessions that expire after `idle` without a request.
///
/// The store evicts records once their expiry passes and holds at most
/// `capacity` of them. `SameSite=Lax` so the cookie comes back on the
/// identity provider's redirect to the callback.
pub fn session_layer(idle: Duration, capacity: u64, secure: bool) -> SessionManagerLayer<MokaStore> {
    let idle = time::Duration::try_from(idle).unwrap_or(time::Duration::HOUR);

    SessionManagerLayer::new(MokaStore::new(Some(capacity)))
        .with_name(SESSION_COOKIE)
        .with_same_site(SameSite::Lax)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(idle))
}
