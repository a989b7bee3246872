//! Bexio Core - error handling, configuration, logging, and constants.
//!
//! This crate provides the shared foundation used by the API client:
//! - A single error type covering request building, execution, and config
//! - TOML configuration for the client and logging
//! - Structured logging with tracing
//! - Default origin, timeouts, and header constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ClientConfig, LoggingConfig};
pub use error::{BexioError, BexioResult};
pub use logging::init_logging;
