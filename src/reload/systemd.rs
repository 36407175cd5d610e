//! Service-manager backed reload dispatch.

use std::process::{Command, Stdio};

use crate::config::schema::ReloadConfig;
use crate::reload::{ReloadDispatchError, ReloadOutcome, ServerReloader};

/// Restarts the web server unit through the host's service manager.
pub struct SystemdReloader {
    config: ReloadConfig,
}

impl SystemdReloader {
    pub fn new(config: ReloadConfig) -> Self {
        Self { config }
    }
}

impl ServerReloader for SystemdReloader {
    fn reload(&self) -> Result<ReloadOutcome, ReloadDispatchError> {
        let mut child = Command::new(&self.config.service_manager)
            .arg(&self.config.action)
            .arg(&self.config.service)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ReloadDispatchError::Spawn)?;

        let pid = child.id();
        tracing::info!(
            service_manager = %self.config.service_manager,
            action = %self.config.action,
            service = %self.config.service,
            pid = pid,
            "Server reload dispatched"
        );

        // reap in the background; the exit status is intentionally unobserved
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(ReloadOutcome {
            dispatched: true,
            pid: Some(pid),
        })
    }
}
