//! Migration project commands

use anyhow::Result;

use crate::commands::CommandContext;
use crate::interactive::value_or_prompt;
use crate::output::{colors, ProjectList, ProjectView};
use migration_portal_application::CreateProjectRequest;
use migration_portal_domain::{CloudProvider, EstimatedDuration, Priority, SourceEnvironment};

/// List projects in the order they were created
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let session = ctx.require_auth()?;
    let projects = ctx.projects.list_projects(&session).await?;
    ctx.emit(&ProjectList(projects))
}

/// Fields of the new-project wizard
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub source: Option<SourceEnvironment>,
    pub provider: Option<CloudProvider>,
    pub applications: Vec<String>,
    pub priority: Option<Priority>,
    /// Bucket label such as `1-2 months`; anything else plans 30 days
    pub duration: Option<String>,
    pub team_lead: Option<String>,
    pub budget: Option<String>,
}

/// Plan a new project starting today
pub async fn create(ctx: &CommandContext, args: CreateArgs) -> Result<()> {
    let session = ctx.require_auth()?;

    let estimated_duration = args.duration.as_deref().and_then(EstimatedDuration::from_label);
    if let (Some(label), None) = (args.duration.as_deref(), estimated_duration) {
        if ctx.chatty() {
            println!(
                "{}",
                colors::warning(&format!(
                    "Unknown duration '{}', planning {} days.",
                    label,
                    EstimatedDuration::DEFAULT_DAYS
                ))
            );
        }
    }

    let request = CreateProjectRequest {
        name: value_or_prompt(args.name, "Project name")?,
        description: args.description.unwrap_or_default(),
        source_environment: args.source,
        target_provider: args.provider,
        applications: args.applications,
        priority: args.priority.unwrap_or_default(),
        estimated_duration,
        team_lead: args.team_lead,
        budget: args.budget,
    };

    let project = ctx.projects.create_project(&session, request).await?;

    if ctx.chatty() {
        println!(
            "{}",
            colors::success(&format!(
                "Project '{}' planned; target date {}.",
                project.name, project.target_date
            ))
        );
    }
    ctx.emit(&ProjectView(project))
}
