//! Event publishing.
//!
//! There is no message broker; published events become structured log
//! records so an operator can follow account and project changes.

use async_trait::async_trait;
use migration_portal_application::{ApplicationError, EventPublisher, ServiceEvent};
use tracing::info;

/// Publishes every service event as an `info` log record.
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        let payload = serde_json::to_string(&event)
            .map_err(|e| ApplicationError::Internal(format!("event encoding failed: {}", e)))?;
        info!(target: "migration_portal::events", event = %payload, "Event published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration_portal_domain::UserId;

    #[tokio::test]
    async fn test_publish_never_fails() {
        let publisher = TracingEventPublisher::new();
        let result = publisher
            .publish(ServiceEvent::UserSignedOut {
                user_id: UserId::new(),
            })
            .await;
        assert!(result.is_ok());
    }
}
