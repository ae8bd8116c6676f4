//! Migration Portal CLI
//!
//! Command-line front end for the cloud migration portal: sign in, manage
//! accounts within your role's reach, and plan migration projects.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use migration_portal_cli::commands::{access, auth, config, projects, users, CommandContext};
use migration_portal_cli::output::OutputFormat;
use migration_portal_common::{init_tracing, PortalConfig};
use migration_portal_domain::{CloudProvider, Priority, SourceEnvironment};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "migration-portal")]
#[command(author, version, about = "Cloud Migration Portal CLI")]
#[command(long_about = "Command-line interface for the cloud migration portal.\n\n\
    Sign in, manage the accounts your role can reach, and plan migration projects.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Additional configuration file, layered above config/default and config/$PORTAL_ENV
    #[arg(long, global = true, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Register a client account
    Signup {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(long)]
        confirm_password: Option<String>,

        /// Code from the verification email
        #[arg(long)]
        code: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Request a password reset link
    ResetPassword {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        code: Option<String>,
    },

    /// Dashboard tabs available to the signed-in account
    Tabs,

    /// Role table commands
    #[command(alias = "r")]
    Roles {
        #[command(subcommand)]
        command: RoleCommands,
    },

    /// Permission checks
    Access {
        #[command(subcommand)]
        command: AccessCommands,
    },

    /// User management commands
    #[command(alias = "u")]
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Migration project commands
    #[command(alias = "p")]
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Show current configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
enum RoleCommands {
    /// List configured roles
    List,

    /// Roles a given role may assign to new accounts
    Creatable {
        /// Role id (defaults to the signed-in account's role)
        #[arg(short, long)]
        role: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AccessCommands {
    /// Check whether a role holds a permission
    Check {
        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        permission: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// List accounts visible to you
    #[command(alias = "ls")]
    List,

    /// Create an account
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Role id (selected interactively when omitted)
        #[arg(short, long)]
        role: Option<String>,

        /// Organization (defaults to yours)
        #[arg(long)]
        organization: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Delete an account by id or email
    #[command(alias = "rm")]
    Delete {
        target: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Act as another account (developers only)
    Impersonate { target: String },
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// List migration projects
    #[command(alias = "ls")]
    List,

    /// Plan a new migration project starting today
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// on-premises, private-cloud, hybrid or other-cloud
        #[arg(long)]
        source: Option<SourceEnvironment>,

        /// aws, azure, gcp or hybrid
        #[arg(long)]
        provider: Option<CloudProvider>,

        /// Application in scope (repeatable)
        #[arg(short, long = "application")]
        applications: Vec<String>,

        /// low, medium, high or critical
        #[arg(long)]
        priority: Option<Priority>,

        /// 1-2 weeks, 3-4 weeks, 1-2 months, 3-6 months or 6+ months
        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        team_lead: Option<String>,

        #[arg(long)]
        budget: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

async fn run(cli: Cli) -> Result<()> {
    let mut portal_config = PortalConfig::load_with(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        portal_config.storage.data_dir = data_dir;
        portal_config.validate()?;
    }

    let telemetry = &portal_config.telemetry;
    let log_level = if cli.verbose {
        "debug"
    } else {
        telemetry.log_level.as_str()
    };
    init_tracing(&telemetry.service_name, telemetry.json_logging, log_level)?;

    let ctx = CommandContext::open(portal_config, cli.format.into()).await?;

    match cli.command {
        Commands::Login { email, password } => auth::login(&ctx, email, password).await,
        Commands::Signup {
            email,
            password,
            confirm_password,
            code,
        } => {
            auth::signup(
                &ctx,
                auth::SignupArgs {
                    email,
                    password,
                    confirm_password,
                    verification_code: code,
                },
            )
            .await
        }
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Whoami => auth::whoami(&ctx).await,
        Commands::ResetPassword { email, code } => auth::reset_password(&ctx, email, code).await,

        Commands::Tabs => access::tabs(&ctx),

        Commands::Roles { command } => match command {
            RoleCommands::List => access::roles_list(&ctx),
            RoleCommands::Creatable { role } => access::roles_creatable(&ctx, role),
        },

        Commands::Access { command } => match command {
            AccessCommands::Check { role, permission } => access::check(&ctx, role, permission),
        },

        Commands::Users { command } => match command {
            UserCommands::List => users::list(&ctx).await,
            UserCommands::Create {
                name,
                email,
                role,
                organization,
                password,
                confirm_password,
            } => {
                users::create(
                    &ctx,
                    users::CreateArgs {
                        name,
                        email,
                        role,
                        organization,
                        password,
                        confirm_password,
                    },
                )
                .await
            }
            UserCommands::Delete { target, yes } => users::delete(&ctx, target, yes).await,
            UserCommands::Impersonate { target } => users::impersonate(&ctx, target).await,
        },

        Commands::Projects { command } => match command {
            ProjectCommands::List => projects::list(&ctx).await,
            ProjectCommands::Create {
                name,
                description,
                source,
                provider,
                applications,
                priority,
                duration,
                team_lead,
                budget,
            } => {
                projects::create(
                    &ctx,
                    projects::CreateArgs {
                        name,
                        description,
                        source,
                        provider,
                        applications,
                        priority,
                        duration,
                        team_lead,
                        budget,
                    },
                )
                .await
            }
        },

        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => config::show(&ctx),
        },
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let verbose = cli.verbose;

    // Handle errors
    if let Err(e) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Details:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_project_create_parses_enums() {
        let cli = Cli::try_parse_from([
            "migration-portal",
            "projects",
            "create",
            "--name",
            "Data Lake",
            "--provider",
            "gcp",
            "--priority",
            "high",
            "-a",
            "billing",
            "-a",
            "crm",
        ])
        .unwrap();

        match cli.command {
            Commands::Projects {
                command:
                    ProjectCommands::Create {
                        provider,
                        priority,
                        applications,
                        ..
                    },
            } => {
                assert_eq!(provider, Some(CloudProvider::Gcp));
                assert_eq!(priority, Some(Priority::High));
                assert_eq!(applications, vec!["billing", "crm"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = Cli::try_parse_from([
            "migration-portal",
            "projects",
            "create",
            "--provider",
            "mainframe",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["migration-portal", "users", "list", "-o", "json"]).unwrap();

        assert!(matches!(cli.format, CliOutputFormat::Json));
    }
}
