//! Project repository backed by a JSON snapshot.

use super::Collection;
use async_trait::async_trait;
use migration_portal_application::{ApplicationError, ProjectRepositoryPort};
use migration_portal_domain::{identifiers::ProjectId, project::MigrationProject};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Insertion-ordered project repository.
pub struct JsonProjectRepository {
    projects: Collection<MigrationProject>,
}

impl JsonProjectRepository {
    pub fn in_memory(projects: Vec<MigrationProject>) -> Self {
        Self {
            projects: Collection::in_memory(projects),
        }
    }

    pub async fn open(path: impl Into<PathBuf>, seed: Vec<MigrationProject>) -> crate::Result<Self> {
        Ok(Self {
            projects: Collection::open(path.into(), seed).await?,
        })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProjectRepositoryPort for JsonProjectRepository {
    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn append(&self, project: MigrationProject) -> Result<(), ApplicationError> {
        self.projects
            .mutate(|projects| {
                projects.push(project);
                Some(())
            })
            .await?;
        debug!("Project appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<MigrationProject>, ApplicationError> {
        Ok(self.projects.snapshot())
    }

    async fn get(&self, id: ProjectId) -> Result<Option<MigrationProject>, ApplicationError> {
        Ok(self.projects.find(|p| p.id == id))
    }
}
