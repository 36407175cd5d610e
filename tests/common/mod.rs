//! Shared utilities for integration testing.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vhost_provisioner::config::schema::{ProvisionerConfig, ProvisioningConfig};
use vhost_provisioner::reload::{ReloadDispatchError, ReloadOutcome, ServerReloader};

/// Reloader stub that counts dispatches instead of touching the host.
pub struct RecordingReloader {
    calls: AtomicUsize,
}

impl RecordingReloader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ServerReloader for RecordingReloader {
    fn reload(&self) -> Result<ReloadOutcome, ReloadDispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ReloadOutcome {
            dispatched: true,
            pid: None,
        })
    }
}

/// Provisioning paths rooted under a test directory.
pub fn provisioning_config(root: &Path) -> ProvisioningConfig {
    ProvisioningConfig {
        base_dir: root.join("home").to_string_lossy().into_owned(),
        vhost_conf_dir: root.join("vhosts").to_string_lossy().into_owned(),
        map_file: root
            .join("httpd_config.conf")
            .to_string_lossy()
            .into_owned(),
        admin_email: "admin@example.com".to_string(),
        enable_gzip: true,
    }
}

/// Full server config rooted under a test directory, with a known API key.
#[allow(dead_code)]
pub fn server_config(root: &Path) -> ProvisionerConfig {
    let mut config = ProvisionerConfig::default();
    config.provisioning = provisioning_config(root);
    config.admin.api_key = "test-key".to_string();
    config
}
