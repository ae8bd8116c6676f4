//! Shared functionality for the migration portal.
//!
//! - Configuration loading (role table, seed data, auth policy, storage, telemetry)
//! - Tracing setup

pub mod config;
pub mod telemetry;

pub use config::{AuthConfig, PortalConfig, SeedProject, SeedUser, StorageConfig, TelemetryConfig};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
