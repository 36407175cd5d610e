//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → admin router (auth gate, operator handlers)
//!     → provisioning orchestrator
//!     → JSON result to client
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
