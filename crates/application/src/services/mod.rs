//! Application Services
//!
//! Orchestration over the store ports: authentication and the session slot,
//! user management under the access rules, and project planning.

mod auth;
mod project;
mod user;

pub use auth::*;
pub use project::*;
pub use user::*;

use crate::ApplicationError;
use async_trait::async_trait;
use serde::Serialize;
use migration_portal_domain::{AuthorizationError, ProjectId, User, UserId};
use uuid::Uuid;

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// The signed-in user (if any)
    pub actor: Option<User>,
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    pub fn anonymous(correlation_id: String) -> Self {
        Self {
            actor: None,
            correlation_id,
        }
    }

    pub fn authenticated(actor: User, correlation_id: String) -> Self {
        Self {
            actor: Some(actor),
            correlation_id,
        }
    }

    /// Context for the given session slot with a fresh correlation id.
    pub fn for_session(actor: Option<User>) -> Self {
        Self {
            actor,
            correlation_id: new_correlation_id(),
        }
    }

    pub fn require_authenticated(&self) -> Result<&User, ApplicationError> {
        self.actor
            .as_ref()
            .ok_or_else(|| AuthorizationError::NotSignedIn.into())
    }
}

/// A new random correlation id
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Service event for event-driven architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceEvent {
    // Session events
    UserSignedIn { user_id: UserId },
    UserSignedOut { user_id: UserId },
    UserImpersonated { actor_id: UserId, user_id: UserId },
    PasswordResetRequested { email: String },

    // User events
    UserRegistered { user_id: UserId },
    UserCreated { user_id: UserId, role: String },
    UserDeleted { user_id: UserId },

    // Project events
    ProjectCreated { project_id: ProjectId },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// Event publisher that drops every event
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}

/// Authorization result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl AuthorizationResult {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn ensure_allowed(&self) -> Result<(), ApplicationError> {
        if self.allowed {
            Ok(())
        } else {
            Err(ApplicationError::Forbidden(
                self.reason
                    .clone()
                    .unwrap_or_else(|| "Access denied".to_string()),
            ))
        }
    }
}

impl From<Result<(), AuthorizationError>> for AuthorizationResult {
    fn from(result: Result<(), AuthorizationError>) -> Self {
        match result {
            Ok(()) => Self::allow(),
            Err(err) => Self::deny(err.to_string()),
        }
    }
}
