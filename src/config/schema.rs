//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! provisioner. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the vhost provisioner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Listener configuration (bind address, timeouts).
    pub listener: ListenerConfig,

    /// Paths and template inputs for vhost provisioning.
    pub provisioning: ProvisioningConfig,

    /// Web server reload settings.
    pub reload: ReloadConfig,

    /// Operator authentication settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8088").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8088".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Provisioning paths and vhost template inputs.
///
/// Defaults mirror a stock OpenLiteSpeed installation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Base directory under which per-domain document roots are created.
    pub base_dir: String,

    /// Directory holding per-domain vhost config subdirectories.
    pub vhost_conf_dir: String,

    /// Master mapping file. Appended to only if it already exists
    /// (seeded by the web server installation).
    pub map_file: String,

    /// Admin contact written into every vhost config.
    pub admin_email: String,

    /// Emit `enableGzip 1` in generated vhost configs.
    pub enable_gzip: bool,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            base_dir: "/home".to_string(),
            vhost_conf_dir: "/usr/local/lsws/conf/vhosts".to_string(),
            map_file: "/usr/local/lsws/conf/httpd_config.conf".to_string(),
            admin_email: "admin@example.com".to_string(),
            enable_gzip: true,
        }
    }
}

/// Web server reload configuration.
///
/// The reload is dispatched as a structured argument list, never a shell
/// string.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Service manager binary (e.g., "systemctl").
    pub service_manager: String,

    /// Action passed to the service manager.
    pub action: String,

    /// Service unit to act on.
    pub service: String,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            service_manager: "systemctl".to_string(),
            action: "restart".to_string(),
            service: "lsws".to_string(),
        }
    }
}

/// Operator authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Operator name recorded in provisioning logs.
    pub operator: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            operator: "admin".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // a provision request is one domain name
        }
    }
}
