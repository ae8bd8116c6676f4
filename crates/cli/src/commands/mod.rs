//! CLI commands

pub mod access;
pub mod auth;
pub mod config;
pub mod projects;
pub mod users;

use crate::output::{Formattable, OutputFormat};
use anyhow::{Context, Result};
use migration_portal_application::{AuthService, ProjectService, ServiceContext, UserService};
use migration_portal_common::PortalConfig;
use migration_portal_domain::{RoleTable, User};
use migration_portal_infrastructure::{
    JsonProjectRepository, JsonUserStore, PortalStores, SessionFile, TracingEventPublisher,
};
use std::sync::Arc;
use tracing::debug;

pub type PortalAuthService = AuthService<JsonUserStore, TracingEventPublisher>;
pub type PortalUserService = UserService<JsonUserStore, TracingEventPublisher>;
pub type PortalProjectService = ProjectService<JsonProjectRepository, TracingEventPublisher>;

/// Context passed to all commands
pub struct CommandContext {
    pub config: PortalConfig,
    pub roles: Arc<RoleTable>,
    pub format: OutputFormat,
    pub auth: PortalAuthService,
    pub users: PortalUserService,
    pub projects: PortalProjectService,
    session: SessionFile,
}

impl CommandContext {
    /// Open the data directory and restore any remembered session.
    pub async fn open(config: PortalConfig, format: OutputFormat) -> Result<Self> {
        let stores = PortalStores::open(&config).await.with_context(|| {
            format!(
                "Failed to open data directory {}",
                config.storage.data_dir.display()
            )
        })?;
        let ctx = Self::from_stores(config, stores, format);
        ctx.restore_session().await?;
        Ok(ctx)
    }

    fn from_stores(config: PortalConfig, stores: PortalStores, format: OutputFormat) -> Self {
        let roles = Arc::new(config.roles.clone());
        let events = Arc::new(TracingEventPublisher::new());

        Self {
            auth: AuthService::new(stores.users.clone(), events.clone(), config.auth.clone()),
            users: UserService::new(stores.users, events.clone(), roles.clone()),
            projects: ProjectService::new(stores.projects, events, roles.clone()),
            session: stores.session,
            roles,
            format,
            config,
        }
    }

    async fn restore_session(&self) -> Result<()> {
        let Some(record) = self.session.load().await? else {
            return Ok(());
        };

        if self.auth.restore_session(record.user_id).await?.is_none() {
            debug!(user_id = %record.user_id, "Remembered account no longer exists");
            self.session.clear().await?;
        }

        Ok(())
    }

    /// Check if a user is signed in, return their service context if so
    pub fn require_auth(&self) -> Result<ServiceContext> {
        if self.auth.current_user().is_none() {
            anyhow::bail!("Not signed in. Please run 'migration-portal login' first.");
        }
        Ok(self.auth.context())
    }

    /// Remember `user` as the signed-in account for later invocations.
    pub async fn remember(&self, user: &User) -> Result<()> {
        self.session.save(user).await?;
        Ok(())
    }

    pub async fn forget(&self) -> Result<()> {
        self.session.clear().await?;
        Ok(())
    }

    /// Print a value in the selected output format
    pub fn emit<T: Formattable>(&self, value: &T) -> Result<()> {
        println!("{}", value.format(self.format)?);
        Ok(())
    }

    /// Whether decorative status lines should be printed
    pub fn chatty(&self) -> bool {
        self.format != OutputFormat::Json
    }
}
