//! Web server reload dispatch.
//!
//! # Responsibilities
//! - Signal the running web server to pick up newly provisioned vhosts
//! - Report whether the invocation was dispatched, nothing more
//!
//! # Design Decisions
//! - Structured argv through the process API, never a shell string
//! - Fire-and-forget: the server coming back up is not observable here;
//!   only a failure to launch the invocation is reported
//! - Trait seam so the orchestrator can be exercised without touching the
//!   host's service manager

pub mod systemd;

use thiserror::Error;

pub use systemd::SystemdReloader;

/// Outcome of a dispatched reload invocation.
#[derive(Debug, Clone)]
pub struct ReloadOutcome {
    /// The invocation was handed to the OS.
    pub dispatched: bool,

    /// PID of the spawned service-manager process.
    pub pid: Option<u32>,
}

/// Errors launching the reload invocation.
///
/// Distinct from the server failing to actually restart, which is not
/// observable at this layer.
#[derive(Debug, Error)]
pub enum ReloadDispatchError {
    #[error("failed to spawn service manager: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Dispatches a reload of the web server process.
pub trait ServerReloader: Send + Sync {
    fn reload(&self) -> Result<ReloadOutcome, ReloadDispatchError>;
}
