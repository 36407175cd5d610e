//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check provisioning paths are absolute and distinct
//! - Validate value ranges (timeouts > 0, addresses parseable)
//! - Catch the placeholder API key before it reaches production
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProvisionerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProvisionerConfig;

/// A single semantic validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("provisioning.{field} {value:?} must be an absolute path")]
    RelativePath { field: &'static str, value: String },

    #[error("provisioning.base_dir and provisioning.vhost_conf_dir must differ")]
    OverlappingRoots,

    #[error("provisioning.admin_email {0:?} is not a plausible address")]
    InvalidAdminEmail(String),

    #[error("reload.{0} must not be empty")]
    EmptyReloadField(&'static str),

    #[error("admin.api_key must not be empty")]
    EmptyApiKey,

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &ProvisionerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    for (field, value) in [
        ("base_dir", &config.provisioning.base_dir),
        ("vhost_conf_dir", &config.provisioning.vhost_conf_dir),
        ("map_file", &config.provisioning.map_file),
    ] {
        if !Path::new(value).is_absolute() {
            errors.push(ValidationError::RelativePath {
                field,
                value: value.clone(),
            });
        }
    }
    if config.provisioning.base_dir == config.provisioning.vhost_conf_dir {
        errors.push(ValidationError::OverlappingRoots);
    }

    let email = &config.provisioning.admin_email;
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.push(ValidationError::InvalidAdminEmail(email.clone()));
    }

    for (field, value) in [
        ("service_manager", &config.reload.service_manager),
        ("action", &config.reload.action),
        ("service", &config.reload.service),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyReloadField(field));
        }
    }

    if config.admin.api_key.is_empty() {
        errors.push(ValidationError::EmptyApiKey);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProvisionerConfig::default()).is_ok());
    }

    #[test]
    fn test_relative_paths_rejected() {
        let mut config = ProvisionerConfig::default();
        config.provisioning.base_dir = "home".to_string();
        config.provisioning.map_file = "conf/httpd_config.conf".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::RelativePath { field: "base_dir", .. })));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = ProvisionerConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.reload.service = "  ".to_string();
        config.admin.api_key = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyApiKey));
        assert!(errors.contains(&ValidationError::EmptyReloadField("service")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidBindAddress(_))));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ProvisionerConfig::default();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
