//! HTTP server startup logic.
//!
//! `Application::build` binds the listener and assembles state; the serve loop
//! marks the service ready just before accepting traffic and guarantees it is
//! reported not ready once the loop returns.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError, ServiceConfig, LIFECYCLE_LOG_TARGET};
use crate::lifecycle::{Lifecycle, Readiness};
use crate::routes::create_router;
use crate::state::AppState;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Invalid server configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(String),
}

/// A bound, not yet serving, HTTP application.
pub struct Application {
    listener: std::net::TcpListener,
    local_addr: SocketAddr,
    router: Router,
    lifecycle: Lifecycle,
    service: ServiceConfig,
}

impl Application {
    /// Bind the configured address and build the router.
    ///
    /// Port 0 binds an ephemeral port; see [`Application::local_addr`].
    pub fn build(config: AppConfig) -> Result<Self, ServerError> {
        let addr = config.http.socket_addr()?;
        let listener = std::net::TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        let readiness = Readiness::new();
        let lifecycle = Lifecycle::new(
            readiness.clone(),
            Handle::new(),
            Duration::from_secs(config.http.shutdown_timeout_seconds),
        );
        let service = config.service.clone();
        let router = create_router(AppState::with_readiness(config, readiness));

        Ok(Self {
            listener,
            local_addr,
            router,
            lifecycle,
            service,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Lifecycle controller shared with the running server.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Serve until a graceful shutdown completes.
    pub async fn run_until_stopped(self) -> Result<(), ServerError> {
        let Self {
            listener,
            local_addr,
            router,
            lifecycle,
            service,
        } = self;

        tracing::info!(
            addr = %local_addr,
            service = %service.name,
            version = %service.version,
            "Starting HTTP server"
        );

        lifecycle.startup_complete();

        let result = axum_server::from_tcp(listener)
            .handle(lifecycle.handle().clone())
            .serve(router.into_make_service())
            .await;

        lifecycle.readiness().mark_not_ready();
        result.map_err(|e| ServerError::Server(e.to_string()))?;

        tracing::info!(target: LIFECYCLE_LOG_TARGET, "Shutdown complete");
        Ok(())
    }
}

/// Start the HTTP server with OS signal handling.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Application) -> Result<(), ServerError> {
    shutdown::setup_shutdown_handler(app.lifecycle());
    app.run_until_stopped().await
}
