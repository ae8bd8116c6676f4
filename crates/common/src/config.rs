//! Configuration management for the portal.
//!
//! Settings are layered (later sources override earlier ones):
//!
//! 1. Built-in defaults (standard role table, demo users and projects)
//! 2. `config/default.toml` (if present)
//! 3. `config/{PORTAL_ENV}.toml` (if present, `PORTAL_ENV` defaults to `development`)
//! 4. An explicit file passed by the caller (required when given)
//! 5. Environment variables prefixed with `PORTAL_`, e.g. `PORTAL_STORAGE__DATA_DIR`
//!
//! ## Example Configuration
//!
//! ```toml
//! [auth]
//! privileged_accounts = ["admin@company.com"]
//! shared_password = "change-me"
//! default_signup_organization = "TechCorp"
//!
//! [[roles]]
//! id = "client"
//! name = "Client"
//! level = 1
//! permissions = ["read_dashboard", "read_own_data"]
//!
//! [[users]]
//! name = "Sarah Wilson"
//! email = "sarah@company.com"
//! role = "client"
//! organization = "TechCorp"
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use migration_portal_domain::{
    project::{CloudProvider, MigrationProject, Priority, ProjectStatus, SourceEnvironment},
    role::{RoleId, RoleTable},
    user::User,
    ProjectId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable selecting the environment-specific config file
pub const ENV_VAR: &str = "PORTAL_ENV";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PORTAL";

/// Main portal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Role table, in privilege order
    #[serde(default)]
    pub roles: RoleTable,

    /// Accounts present in a fresh user store
    #[serde(default = "default_seed_users")]
    pub users: Vec<SeedUser>,

    /// Projects present in a fresh project repository
    #[serde(default = "default_seed_projects")]
    pub projects: Vec<SeedProject>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// A user account declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    pub role: RoleId,
    #[serde(default)]
    pub organization: Option<String>,
}

impl SeedUser {
    fn new(name: &str, email: &str, role: &str, organization: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role: RoleId::new(role),
            organization: Some(organization.to_string()),
        }
    }

    /// Materialize the seed as a fresh active account.
    pub fn to_user(&self) -> User {
        User::new(
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.organization.clone(),
        )
    }
}

/// A migration project declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: u8,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub source_environment: Option<SourceEnvironment>,
    #[serde(default)]
    pub target_provider: Option<CloudProvider>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub team_lead: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

impl SeedProject {
    pub fn to_project(&self) -> MigrationProject {
        MigrationProject {
            id: ProjectId::new(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            progress: self.progress,
            start_date: self.start_date,
            target_date: self.target_date,
            source_environment: self.source_environment,
            target_provider: self.target_provider,
            applications: self.applications.clone(),
            priority: self.priority,
            team_lead: self.team_lead.clone(),
            budget: self.budget.clone(),
        }
    }
}

/// Mock authentication policy.
///
/// Demo behavior only: privileged accounts share one plaintext password and
/// every other account accepts any non-empty password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Emails that must present `shared_password`. None unless configured.
    #[serde(default)]
    pub privileged_accounts: Vec<String>,

    #[serde(default)]
    pub shared_password: Option<String>,

    /// Organization given to self-registered accounts
    #[serde(default = "default_signup_organization")]
    pub default_signup_organization: Option<String>,
}

impl AuthConfig {
    pub fn is_privileged(&self, email: &str) -> bool {
        self.privileged_accounts.iter().any(|e| e == email)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            privileged_accounts: Vec::new(),
            shared_password: None,
            default_signup_organization: default_signup_organization(),
        }
    }
}

/// Where the CLI keeps its JSON state files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_seed_users() -> Vec<SeedUser> {
    vec![
        SeedUser::new("John Doe", "john@company.com", RoleId::DEVELOPER, "TechCorp"),
        SeedUser::new("Jane Smith", "jane@company.com", RoleId::LOCAL_ADMIN, "TechCorp"),
        SeedUser::new("Mike Johnson", "mike@company.com", RoleId::MANAGER, "TechCorp"),
        SeedUser::new("Sarah Wilson", "sarah@company.com", RoleId::CLIENT, "TechCorp"),
        SeedUser::new("Gundo", "gundo@company.com", RoleId::DEVELOPER, "TechCorp"),
        SeedUser::new("Admin User", "admin@company.com", RoleId::DEVELOPER, "TechCorp"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_project(
    name: &str,
    description: &str,
    status: ProjectStatus,
    progress: u8,
    dates: (NaiveDate, NaiveDate),
    provider: CloudProvider,
    team_lead: &str,
    budget: &str,
) -> SeedProject {
    SeedProject {
        name: name.to_string(),
        description: description.to_string(),
        status,
        progress,
        start_date: dates.0,
        target_date: dates.1,
        source_environment: None,
        target_provider: Some(provider),
        applications: Vec::new(),
        priority: Priority::default(),
        team_lead: Some(team_lead.to_string()),
        budget: Some(budget.to_string()),
    }
}

fn default_seed_projects() -> Vec<SeedProject> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);

    vec![
        seed_project(
            "E-commerce Platform",
            "Migrating core e-commerce services to AWS EKS",
            ProjectStatus::InProgress,
            75,
            (date(2024, 1, 15), date(2024, 3, 30)),
            CloudProvider::Aws,
            "John Smith",
            "$75,000",
        ),
        seed_project(
            "Data Analytics Pipeline",
            "Moving data warehouse to Azure Synapse",
            ProjectStatus::Planning,
            25,
            (date(2024, 2, 1), date(2024, 5, 15)),
            CloudProvider::Azure,
            "Sarah Johnson",
            "$120,000",
        ),
        seed_project(
            "Legacy CRM System",
            "Modernizing CRM with cloud-native architecture",
            ProjectStatus::Completed,
            100,
            (date(2023, 11, 1), date(2024, 1, 31)),
            CloudProvider::Gcp,
            "Mike Davis",
            "$95,000",
        ),
    ]
}

fn default_signup_organization() -> Option<String> {
    Some("TechCorp".to_string())
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".migration-portal")
}

fn default_service_name() -> String {
    "migration-portal".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            roles: RoleTable::standard(),
            users: default_seed_users(),
            projects: default_seed_projects(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from the default file locations and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use migration_portal_common::config::PortalConfig;
    ///
    /// let config = PortalConfig::load().expect("Failed to load configuration");
    /// println!("{} roles defined", config.roles.len());
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Like [`PortalConfig::load`], with an additional required file layered
    /// above the default locations.
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            // Example: PORTAL_TELEMETRY__LOG_LEVEL=debug
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(config)
    }

    /// Parse a TOML document on top of the built-in defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?;

        Self::from_config(config)
    }

    fn from_config(config: config::Config) -> Result<Self> {
        let portal_config: PortalConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        portal_config.validate()?;

        Ok(portal_config)
    }

    /// Validate cross-field constraints not covered by deserialization.
    ///
    /// The role table validates itself while deserializing.
    pub fn validate(&self) -> Result<()> {
        let mut emails = HashSet::new();
        for user in &self.users {
            if user.email.trim().is_empty() {
                anyhow::bail!("Seed user '{}' has no email", user.name);
            }
            if !emails.insert(user.email.as_str()) {
                anyhow::bail!("Seed user email '{}' is listed more than once", user.email);
            }
        }

        for project in &self.projects {
            if project.name.trim().is_empty() {
                anyhow::bail!("Seed projects must have a name");
            }
            if project.progress > 100 {
                anyhow::bail!(
                    "Seed project '{}' has progress {} (must be 0-100)",
                    project.name,
                    project.progress
                );
            }
        }

        if !self.auth.privileged_accounts.is_empty()
            && self
                .auth
                .shared_password
                .as_deref()
                .map_or(true, str::is_empty)
        {
            anyhow::bail!("auth.shared_password is required when privileged accounts are configured");
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            anyhow::bail!("storage.data_dir must not be empty");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }

    /// Seed users materialized as fresh accounts, in configuration order.
    pub fn seed_users(&self) -> Vec<User> {
        self.users.iter().map(SeedUser::to_user).collect()
    }

    /// Seed projects materialized with fresh identifiers, in configuration order.
    pub fn seed_projects(&self) -> Vec<MigrationProject> {
        self.projects.iter().map(SeedProject::to_project).collect()
    }
}
