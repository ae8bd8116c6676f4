//! User store backed by a JSON snapshot.

use super::Collection;
use async_trait::async_trait;
use migration_portal_application::{ApplicationError, UserStorePort};
use migration_portal_domain::{identifiers::UserId, user::User};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Insertion-ordered user store.
pub struct JsonUserStore {
    users: Collection<User>,
}

impl JsonUserStore {
    /// A store that lives only as long as the process.
    pub fn in_memory(users: Vec<User>) -> Self {
        Self {
            users: Collection::in_memory(users),
        }
    }

    /// Open the snapshot at `path`, seeding it with `seed` if absent.
    pub async fn open(path: impl Into<PathBuf>, seed: Vec<User>) -> crate::Result<Self> {
        Ok(Self {
            users: Collection::open(path.into(), seed).await?,
        })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStorePort for JsonUserStore {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn append(&self, user: User) -> Result<(), ApplicationError> {
        self.users
            .mutate(|users| {
                users.push(user);
                Some(())
            })
            .await?;
        debug!("User appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApplicationError> {
        Ok(self.users.snapshot())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.find(|u| u.id == id))
    }

    /// First account with this exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.find(|u| u.email == email))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn replace(&self, user: User) -> Result<(), ApplicationError> {
        let id = user.id;
        self.users
            .mutate(|users| {
                let slot = users.iter_mut().find(|u| u.id == id)?;
                *slot = user;
                Some(())
            })
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", id)))
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        let removed = self
            .users
            .mutate(|users| {
                let index = users.iter().position(|u| u.id == id)?;
                Some(users.remove(index))
            })
            .await?;
        Ok(removed)
    }
}
