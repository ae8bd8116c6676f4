//! Mock implementations for the store ports and the event publisher.
//!
//! All mocks keep their state behind `parking_lot` locks and count the
//! mutating calls so tests can assert that a rejected request wrote nothing.

use async_trait::async_trait;
use migration_portal_application::{
    ApplicationError, EventPublisher, ProjectRepositoryPort, ServiceEvent, UserStorePort,
};
use migration_portal_domain::{identifiers::*, project::MigrationProject, user::User};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Event publisher that records every event
pub struct MockEventPublisher {
    pub published_events: Arc<RwLock<Vec<ServiceEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn get_published_events(&self) -> Vec<ServiceEvent> {
        self.published_events.read().clone()
    }

    pub fn clear(&self) {
        self.published_events.write().clear();
    }

    pub fn event_count(&self) -> usize {
        self.published_events.read().len()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        self.published_events.write().push(event);
        Ok(())
    }
}

/// Mock user store for testing
pub struct MockUserStore {
    users: Arc<RwLock<Vec<User>>>,
    writes: AtomicUsize,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Current contents, in order
    pub fn snapshot(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn count(&self) -> usize {
        self.users.read().len()
    }

    /// Number of append, replace and remove calls that changed the store
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStorePort for MockUserStore {
    async fn append(&self, user: User) -> Result<(), ApplicationError> {
        self.users.write().push(user);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApplicationError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn replace(&self, user: User) -> Result<(), ApplicationError> {
        let mut users = self.users.write();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", user.id)))?;
        *slot = user;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        let mut users = self.users.write();
        let removed = users
            .iter()
            .position(|u| u.id == id)
            .map(|index| users.remove(index));
        if removed.is_some() {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

/// Mock project repository for testing
pub struct MockProjectRepository {
    projects: Arc<RwLock<Vec<MigrationProject>>>,
}

impl MockProjectRepository {
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    pub fn with_projects(projects: Vec<MigrationProject>) -> Self {
        Self {
            projects: Arc::new(RwLock::new(projects)),
        }
    }

    pub fn count(&self) -> usize {
        self.projects.read().len()
    }
}

impl Default for MockProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectRepositoryPort for MockProjectRepository {
    async fn append(&self, project: MigrationProject) -> Result<(), ApplicationError> {
        self.projects.write().push(project);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<MigrationProject>, ApplicationError> {
        Ok(self.projects.read().clone())
    }

    async fn get(&self, id: ProjectId) -> Result<Option<MigrationProject>, ApplicationError> {
        Ok(self.projects.read().iter().find(|p| p.id == id).cloned())
    }
}
