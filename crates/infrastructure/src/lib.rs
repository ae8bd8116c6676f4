//! Infrastructure layer for the migration portal
//!
//! This crate provides implementations for:
//! - The user store and project repository ports, in memory or backed by
//!   JSON snapshot files
//! - The persisted session slot used by the command line front end
//! - An event publisher that writes service events to the log
//!
//! ## Architecture
//!
//! Stores keep the whole collection in memory and, when opened on a file,
//! rewrite the snapshot after every mutation. A store opened on a missing
//! file starts from the configured seed data.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use migration_portal_common::PortalConfig;
//! use migration_portal_infrastructure::PortalStores;
//!
//! let config = PortalConfig::load()?;
//! let stores = PortalStores::open(&config).await?;
//! let users = stores.users.clone();
//! ```

pub mod events;
pub mod repositories;
pub mod session;
pub mod snapshot;

pub use events::TracingEventPublisher;
pub use repositories::{JsonProjectRepository, JsonUserStore};
pub use session::{SessionFile, SessionRecord};
pub use snapshot::SnapshotFile;

use migration_portal_application::ApplicationError;
use migration_portal_common::PortalConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// File names inside the data directory
pub const USERS_FILE: &str = "users.json";
pub const PROJECTS_FILE: &str = "projects.json";
pub const SESSION_FILE: &str = "session.json";

// Re-export result and error types
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem errors
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        ApplicationError::Internal(err.to_string())
    }
}

/// The stores the services run against.
pub struct PortalStores {
    pub users: Arc<JsonUserStore>,
    pub projects: Arc<JsonProjectRepository>,
    pub session: SessionFile,
}

impl PortalStores {
    /// Open the stores under the configured data directory, seeding any
    /// snapshot that does not exist yet.
    #[instrument(skip(config), fields(data_dir = %config.storage.data_dir.display()))]
    pub async fn open(config: &PortalConfig) -> Result<Self> {
        let data_dir = &config.storage.data_dir;
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| Error::io(data_dir, e))?;

        let users = JsonUserStore::open(data_dir.join(USERS_FILE), config.seed_users()).await?;
        let projects =
            JsonProjectRepository::open(data_dir.join(PROJECTS_FILE), config.seed_projects())
                .await?;

        debug!("Portal stores opened");

        Ok(Self {
            users: Arc::new(users),
            projects: Arc::new(projects),
            session: SessionFile::new(data_dir.join(SESSION_FILE)),
        })
    }

    /// Seeded stores that never touch the filesystem, except for the
    /// session file which still lives under the data directory.
    pub fn in_memory(config: &PortalConfig) -> Self {
        Self {
            users: Arc::new(JsonUserStore::in_memory(config.seed_users())),
            projects: Arc::new(JsonProjectRepository::in_memory(config.seed_projects())),
            session: SessionFile::new(config.storage.data_dir.join(SESSION_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_to_internal() {
        let err: ApplicationError = Error::io(
            "/nowhere",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.message().contains("/nowhere"));
    }
}
