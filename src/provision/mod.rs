//! Vhost provisioning subsystem.
//!
//! # Data Flow
//! ```text
//! raw domain string (operator request)
//!     → domain.rs (trim, validate, normalize)
//!     → docroot.rs (ensure document root exists)
//!     → vhost_conf.rs (render + write vhost.conf)
//!     → mapping.rs (append master mapping record)
//!     → reload dispatch (see crate::reload)
//!     → ProvisioningResult back to operator
//! ```
//!
//! # Design Decisions
//! - The validated Domain is the only value trusted as a path segment;
//!   every other component consumes it, never the raw input
//! - Steps run in a fixed order; the first failure short-circuits the rest
//! - No rollback: artifacts created before a failure are left in place
//! - No cross-request coordination; the filesystem is the shared sink

pub mod docroot;
pub mod domain;
pub mod mapping;
pub mod orchestrator;
pub mod vhost_conf;

pub use domain::{Domain, ValidationError};
pub use orchestrator::{OperatorContext, Provisioner, ProvisioningResult, Stage};
