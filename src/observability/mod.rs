//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (provisioning counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all subsystems
//! - Metrics are cheap (atomic increments) and a no-op until the
//!   exporter is installed

pub mod logging;
pub mod metrics;
