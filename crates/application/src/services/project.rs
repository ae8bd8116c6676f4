//! Project Service
//!
//! Planning and listing of migration projects.

use super::{EventPublisher, ServiceContext, ServiceEvent};
use crate::validation::{CreateProjectRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use migration_portal_domain::{
    access, role::permissions, MigrationProject, ProjectId, ProjectPlan, RoleTable,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Project repository trait
#[async_trait]
pub trait ProjectRepositoryPort: Send + Sync {
    async fn append(&self, project: MigrationProject) -> Result<(), ApplicationError>;
    /// All projects in insertion order.
    async fn list(&self) -> Result<Vec<MigrationProject>, ApplicationError>;
    async fn get(&self, id: ProjectId) -> Result<Option<MigrationProject>, ApplicationError>;
}

/// Project service implementation
pub struct ProjectService<P, E>
where
    P: ProjectRepositoryPort,
    E: EventPublisher,
{
    repository: Arc<P>,
    event_publisher: Arc<E>,
    roles: Arc<RoleTable>,
}

impl<P, E> ProjectService<P, E>
where
    P: ProjectRepositoryPort,
    E: EventPublisher,
{
    pub fn new(repository: Arc<P>, event_publisher: Arc<E>, roles: Arc<RoleTable>) -> Self {
        Self {
            repository,
            event_publisher,
            roles,
        }
    }

    /// Plan a new project starting today (UTC).
    pub async fn create_project(
        &self,
        ctx: &ServiceContext,
        request: CreateProjectRequest,
    ) -> ApplicationResult<MigrationProject> {
        self.create_project_on(ctx, request, Utc::now().date_naive())
            .await
    }

    /// Plan a new project starting on `today`.
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id, name = %request.name))]
    pub async fn create_project_on(
        &self,
        ctx: &ServiceContext,
        request: CreateProjectRequest,
        today: NaiveDate,
    ) -> ApplicationResult<MigrationProject> {
        self.require_dashboard(ctx, "create")?;

        request.validate_all().ensure_valid()?;

        let project = MigrationProject::plan(ProjectPlan::from(request), today).ok_or_else(|| {
            ApplicationError::InvalidInput("Target date is out of range".to_string())
        })?;

        self.repository.append(project.clone()).await?;

        info!(
            project_id = %project.id,
            target_date = %project.target_date,
            "Migration project created"
        );

        self.event_publisher
            .publish(ServiceEvent::ProjectCreated {
                project_id: project.id,
            })
            .await?;

        Ok(project)
    }

    fn require_dashboard(&self, ctx: &ServiceContext, action: &str) -> ApplicationResult<()> {
        let actor = ctx.require_authenticated()?;

        if let Err(denial) =
            access::require_permission(&self.roles, actor, permissions::READ_DASHBOARD)
        {
            warn!(actor = %actor.email, action, "Project access denied");
            return Err(denial.into());
        }
        Ok(())
    }

    /// All projects in insertion order.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_projects(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<MigrationProject>> {
        self.require_dashboard(ctx, "list")?;
        self.repository.list().await
    }

    /// Get a project by ID
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get_project(
        &self,
        ctx: &ServiceContext,
        id: ProjectId,
    ) -> ApplicationResult<MigrationProject> {
        self.require_dashboard(ctx, "read")?;
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Project not found: {}", id)))
    }
}
