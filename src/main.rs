//! Vhost Provisioning Control Plane
//!
//! A small control-plane daemon for provisioning OpenLiteSpeed virtual
//! hosts, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                VHOST PROVISIONER                  │
//!                     │                                                   │
//!   Operator Request  │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│  admin   │───▶│  provision  │  │
//!   (CLI / curl)      │  │ server  │    │auth gate │    │orchestrator │  │
//!                     │  └─────────┘    └──────────┘    └──────┬──────┘  │
//!                     │                                        │         │
//!                     │                 ┌──────────────────────┼───────┐ │
//!                     │                 ▼          ▼           ▼       │ │
//!                     │           ┌─────────┐ ┌─────────┐ ┌─────────┐  │ │
//!                     │           │ docroot │ │  vhost  │ │ mapping │  │ │
//!                     │           │  (mkdir)│ │  conf   │ │ (append)│  │ │
//!                     │           └─────────┘ └─────────┘ └─────────┘  │ │
//!                     │                                        │       │ │
//!                     │                                        ▼       │ │
//!   Result            │                                  ┌─────────┐   │ │
//!   ◀─────────────────┼──────────────────────────────────│ reload  │───┼─┼──▶ web server
//!                     │                                  │dispatch │   │ │    (systemctl)
//!                     │                                  └─────────┘   │ │
//!                     │                                                │ │
//!                     │  ┌─────────────────────────────────────────────┘ │
//!                     │  │            Cross-Cutting Concerns              │
//!                     │  │  ┌────────┐ ┌─────────────┐ ┌──────────────┐  │
//!                     │  │  │ config │ │observability│ │  lifecycle   │  │
//!                     │  │  │+watcher│ │ logs/metrics│ │   shutdown   │  │
//!                     │  │  └────────┘ └─────────────┘ └──────────────┘  │
//!                     │  └───────────────────────────────────────────────┤
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;

use vhost_provisioner::config::loader::load_config_or_default;
use vhost_provisioner::config::watcher::ConfigWatcher;
use vhost_provisioner::observability::{logging, metrics};
use vhost_provisioner::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "provisioner.toml".to_string());
    let config = load_config_or_default(Path::new(&config_path))?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("vhost-provisioner v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_dir = %config.provisioning.base_dir,
        vhost_conf_dir = %config.provisioning.vhost_conf_dir,
        map_file = %config.provisioning.map_file,
        service = %config.reload.service,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    let state = server.state();

    // Hot reload of our own config file
    let shutdown = Shutdown::new();
    let (watcher, mut updates) = ConfigWatcher::new(Path::new(&config_path));
    let _watch_guard = match watcher.run() {
        Ok(guard) => Some(guard),
        Err(e) => {
            tracing::warn!(error = %e, "Config watcher disabled");
            None
        }
    };

    let mut shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(new_config) = updates.recv() => state.apply_config(new_config),
                _ = shutdown_rx.recv() => break,
            }
        }
    });

    server.run(listener).await?;
    shutdown.trigger();

    tracing::info!("Shutdown complete");
    Ok(())
}
