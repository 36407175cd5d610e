//! Provisioning orchestration.
//!
//! Runs the fixed stage sequence for one operator request:
//! `Validate → EnsureDocRoot → WriteVhostConfig → AppendMapping →
//! ReloadServer`. The first failure short-circuits the remaining stages;
//! nothing is retried and nothing is rolled back.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::schema::ProvisioningConfig;
use crate::observability::metrics;
use crate::provision::docroot::ensure_document_root;
use crate::provision::domain::{self, Domain, ValidationError};
use crate::provision::mapping::append_mapping;
use crate::provision::vhost_conf::write_vhost_config;
use crate::reload::{ReloadDispatchError, ServerReloader};

/// Authentication context established by the caller's gate.
///
/// The orchestrator never reads ambient session state; whoever calls it
/// must already have authenticated the operator and hand the proof in.
#[derive(Debug, Clone)]
pub struct OperatorContext {
    /// Operator identity, recorded in logs.
    pub operator: String,
}

/// Provisioning stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    EnsureDocRoot,
    WriteVhostConfig,
    AppendMapping,
    ReloadServer,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::EnsureDocRoot => "ensure_doc_root",
            Stage::WriteVhostConfig => "write_vhost_config",
            Stage::AppendMapping => "append_mapping",
            Stage::ReloadServer => "reload_server",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage failure, carrying the underlying cause.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("domain validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to create document root: {0}")]
    DocRoot(#[source] io::Error),

    #[error("failed to write vhost config: {0}")]
    VhostConfig(#[source] io::Error),

    #[error("failed to append host mapping: {0}")]
    Mapping(#[source] io::Error),

    #[error("failed to dispatch server reload: {0}")]
    Reload(#[from] ReloadDispatchError),
}

impl ProvisionError {
    /// The stage this failure occurred in.
    pub fn stage(&self) -> Stage {
        match self {
            ProvisionError::Validation(_) => Stage::Validate,
            ProvisionError::DocRoot(_) => Stage::EnsureDocRoot,
            ProvisionError::VhostConfig(_) => Stage::WriteVhostConfig,
            ProvisionError::Mapping(_) => Stage::AppendMapping,
            ProvisionError::Reload(_) => Stage::ReloadServer,
        }
    }
}

/// Outcome of one provisioning request, reported back to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningResult {
    /// Correlates the result with log lines.
    pub request_id: Uuid,

    pub success: bool,

    /// The validated domain, when validation got that far.
    pub domain: Option<String>,

    /// The failed stage, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    /// Human-readable success line or error detail.
    pub message: String,
}

/// Orchestrates the provisioning stages for single requests.
pub struct Provisioner {
    config: ProvisioningConfig,
    reloader: Arc<dyn ServerReloader>,
}

impl Provisioner {
    pub fn new(config: ProvisioningConfig, reloader: Arc<dyn ServerReloader>) -> Self {
        Self { config, reloader }
    }

    /// Provision `raw_domain` end to end on behalf of `ctx`.
    ///
    /// Fully synchronous; each stage either completes or fails
    /// immediately. Artifacts written before a failing stage are left in
    /// place.
    pub fn provision(&self, ctx: &OperatorContext, raw_domain: &str) -> ProvisioningResult {
        let request_id = Uuid::new_v4();

        let domain = match domain::validate(raw_domain) {
            Ok(domain) => domain,
            Err(error) => {
                return self.failure(request_id, ctx, None, ProvisionError::Validation(error))
            }
        };

        match self.run_stages(request_id, &domain) {
            Ok(()) => {
                tracing::info!(
                    request_id = %request_id,
                    operator = %ctx.operator,
                    domain = %domain,
                    "Domain provisioned"
                );
                metrics::record_provision_success();
                ProvisioningResult {
                    request_id,
                    success: true,
                    message: format!("domain provisioned: {}", domain),
                    domain: Some(domain.as_str().to_string()),
                    stage: None,
                }
            }
            Err(error) => self.failure(request_id, ctx, Some(&domain), error),
        }
    }

    fn failure(
        &self,
        request_id: Uuid,
        ctx: &OperatorContext,
        domain: Option<&Domain>,
        error: ProvisionError,
    ) -> ProvisioningResult {
        let stage = error.stage();
        tracing::warn!(
            request_id = %request_id,
            operator = %ctx.operator,
            stage = %stage,
            error = %error,
            "Provisioning failed"
        );
        metrics::record_provision_failure(stage.as_str());
        ProvisioningResult {
            request_id,
            success: false,
            domain: domain.map(|d| d.as_str().to_string()),
            stage: Some(stage),
            message: error.to_string(),
        }
    }

    fn run_stages(&self, request_id: Uuid, domain: &Domain) -> Result<(), ProvisionError> {
        let doc_root = ensure_document_root(domain, Path::new(&self.config.base_dir))
            .map_err(ProvisionError::DocRoot)?;
        tracing::debug!(request_id = %request_id, doc_root = %doc_root.display(), "Document root ready");

        let conf_path = write_vhost_config(
            domain,
            &doc_root,
            Path::new(&self.config.vhost_conf_dir),
            &self.config.admin_email,
            self.config.enable_gzip,
        )
        .map_err(ProvisionError::VhostConfig)?;
        tracing::debug!(request_id = %request_id, conf = %conf_path.display(), "Vhost config written");

        let appended = append_mapping(domain, Path::new(&self.config.map_file))
            .map_err(ProvisionError::Mapping)?;
        if !appended {
            tracing::warn!(
                request_id = %request_id,
                map_file = %self.config.map_file,
                "Map file absent, mapping step skipped"
            );
        }

        self.reloader.reload()?;
        metrics::record_reload_dispatched();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::{ReloadOutcome, ServerReloader};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingReloader {
        calls: AtomicUsize,
    }

    impl RecordingReloader {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
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

    struct FailingReloader;

    impl ServerReloader for FailingReloader {
        fn reload(&self) -> Result<ReloadOutcome, ReloadDispatchError> {
            Err(ReloadDispatchError::Spawn(io::Error::new(
                io::ErrorKind::NotFound,
                "no service manager",
            )))
        }
    }

    fn test_config(root: &Path) -> ProvisioningConfig {
        ProvisioningConfig {
            base_dir: root.join("home").to_string_lossy().into_owned(),
            vhost_conf_dir: root.join("vhosts").to_string_lossy().into_owned(),
            map_file: root.join("httpd_config.conf").to_string_lossy().into_owned(),
            admin_email: "admin@example.com".to_string(),
            enable_gzip: true,
        }
    }

    fn operator() -> OperatorContext {
        OperatorContext {
            operator: "admin".to_string(),
        }
    }

    #[test]
    fn test_full_run_creates_all_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        fs::write(&config.map_file, "").unwrap();
        let reloader = RecordingReloader::new();
        let provisioner = Provisioner::new(config.clone(), reloader.clone());

        let result = provisioner.provision(&operator(), "  MyShop.Example.com  ");

        assert!(result.success, "{}", result.message);
        assert_eq!(result.domain.as_deref(), Some("myshop.example.com"));
        assert!(root
            .path()
            .join("home/myshop.example.com/public_html")
            .is_dir());

        let conf = fs::read_to_string(
            root.path().join("vhosts/myshop.example.com/vhost.conf"),
        )
        .unwrap();
        assert!(conf.contains("vhDomain myshop.example.com\n"));

        let map = fs::read_to_string(&config.map_file).unwrap();
        assert!(map.contains("virtualHost myshop.example.com myshop.example.com\n"));
        assert_eq!(reloader.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validation_failure_touches_nothing() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let reloader = RecordingReloader::new();
        let provisioner = Provisioner::new(config, reloader.clone());

        let result = provisioner.provision(&operator(), "../../etc");

        assert!(!result.success);
        assert_eq!(result.stage, Some(Stage::Validate));
        assert_eq!(result.domain, None);
        assert!(!root.path().join("home").exists());
        assert!(!root.path().join("vhosts").exists());
        assert_eq!(reloader.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reload_failure_leaves_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let provisioner = Provisioner::new(config, Arc::new(FailingReloader));

        let result = provisioner.provision(&operator(), "example.com");

        assert!(!result.success);
        assert_eq!(result.stage, Some(Stage::ReloadServer));
        assert_eq!(result.domain.as_deref(), Some("example.com"));
        // no rollback: earlier artifacts stay
        assert!(root.path().join("home/example.com/public_html").is_dir());
        assert!(root.path().join("vhosts/example.com/vhost.conf").is_file());
    }

    #[test]
    fn test_missing_map_file_is_not_a_failure() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let provisioner = Provisioner::new(config.clone(), RecordingReloader::new());

        let result = provisioner.provision(&operator(), "example.com");

        assert!(result.success);
        assert!(!Path::new(&config.map_file).exists());
    }
}
