//! Metrics collection and exposition.
//!
//! # Metrics
//! - `provision_requests_total` (counter): provisioning attempts by outcome
//! - `provision_failures_total` (counter): failures by stage
//! - `reload_dispatch_total` (counter): reload invocations handed to the OS
//!
//! # Design Decisions
//! - Recording before `init_metrics` runs is a silent no-op, so the core
//!   never depends on the exporter being up

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

pub fn record_provision_success() {
    counter!("provision_requests_total", "outcome" => "success").increment(1);
}

pub fn record_provision_failure(stage: &'static str) {
    counter!("provision_requests_total", "outcome" => "failure").increment(1);
    counter!("provision_failures_total", "stage" => stage).increment(1);
}

pub fn record_reload_dispatched() {
    counter!("reload_dispatch_total").increment(1);
}
