//! Main entry point for the Taskboard web client.
//!
//! This file initializes logging, reads the configuration, builds the
//! remote API and identity provider clients, and serves the router until
//! Ctrl-C.

use std::process::ExitCode;
use std::sync::Arc;

use taskboard::config::{Config, LOG_ENV};
use taskboard::{AppState, StartupError, app, middleware};
use taskboard_adapters::http::HttpTaskApi;
use taskboard_adapters::oidc::OidcProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "taskboard stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let api = HttpTaskApi::new(config.api_base_url.clone(), config.http_timeout)?;
    let identity = OidcProvider::new(config.oidc.clone(), config.http_timeout)?;
    let state = AppState::new(Arc::new(api), Arc::new(identity));
    let router = app(
        state,
        middleware::session_layer(
            config.session_idle,
            config.session_capacity,
            config.secure_cookies,
        ),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    tracing::info!(
        addr = %config.bind_addr,
        api = %config.api_base_url,
        authority = %config.oidc.authority,
        "taskboard listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
