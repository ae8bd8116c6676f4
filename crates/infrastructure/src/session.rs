//! Persisted session slot.
//!
//! The front end is a short-lived process, so the signed-in account is
//! remembered between invocations by id. Emails are not unique, so the email
//! is kept for display only. A deleted account simply yields no session.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use migration_portal_domain::{User, UserId};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// What is stored for the signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Session file handle
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, if any.
    ///
    /// An unreadable session file is treated as signed out.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Option<SessionRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    /// Remember `user` as the signed-in account.
    #[instrument(skip(self, user), fields(path = %self.path.display(), user_id = %user.id))]
    pub async fn save(&self, user: &User) -> Result<SessionRecord> {
        let record = SessionRecord {
            user_id: user.id,
            email: user.email.clone(),
            signed_in_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| Error::io(&self.path, e))?;

        debug!("Session saved");
        Ok(record)
    }

    /// Forget the session. Clearing an absent session is not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }
}
