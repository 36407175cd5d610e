//! Vhost Provisioning Control Plane Library

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod provision;
pub mod reload;

pub use config::ProvisionerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use provision::{Provisioner, ProvisioningResult};
