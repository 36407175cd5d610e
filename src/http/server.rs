//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, timeout)
//! - Bind server to listener
//! - Hold the live state that config hot-reload swaps atomically

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::ProvisionerConfig;
use crate::lifecycle::signals::shutdown_signal;
use crate::provision::Provisioner;
use crate::reload::{ServerReloader, SystemdReloader};

/// Live state behind the atomic swap. Rebuilt whole on config reload.
pub struct AppInner {
    pub config: ProvisionerConfig,
    pub provisioner: Arc<Provisioner>,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<AppInner>>,
}

impl AppState {
    /// Build state with the host's service manager as the reload target.
    pub fn new(config: ProvisionerConfig) -> Self {
        let reloader = Arc::new(SystemdReloader::new(config.reload.clone()));
        Self::with_reloader(config, reloader)
    }

    /// Build state with a caller-supplied reloader (used by tests).
    pub fn with_reloader(config: ProvisionerConfig, reloader: Arc<dyn ServerReloader>) -> Self {
        let provisioner = Arc::new(Provisioner::new(config.provisioning.clone(), reloader));
        Self {
            inner: Arc::new(ArcSwap::from_pointee(AppInner {
                config,
                provisioner,
            })),
        }
    }

    /// Swap in a freshly validated configuration.
    pub fn apply_config(&self, config: ProvisionerConfig) {
        let reloader = Arc::new(SystemdReloader::new(config.reload.clone()));
        let provisioner = Arc::new(Provisioner::new(config.provisioning.clone(), reloader));
        self.inner.store(Arc::new(AppInner {
            config,
            provisioner,
        }));
        tracing::info!("Configuration reloaded");
    }
}

/// HTTP server for the provisioner.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProvisionerConfig) -> Self {
        let state = AppState::new(config.clone());
        Self::with_state(&config, state)
    }

    /// Create a server around pre-built state (used by tests).
    pub fn with_state(config: &ProvisionerConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProvisionerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .merge(admin::setup_admin_router(state))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Shared state handle, for the config hot-reload task.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Unauthenticated liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
