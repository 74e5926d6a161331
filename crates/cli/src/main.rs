//! WorkPro CLI - Sign in, pick a company and work with its tasks.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password may also come from WORKPRO_PASSWORD)
//! wp-cli login -e jane@example.com -p secret
//!
//! # Pick the company to work in
//! wp-cli company list
//! wp-cli company select 64f1c2 -r manager
//!
//! # Task views
//! wp-cli tasks board
//! wp-cli tasks calendar --year 2026 --month 10
//! ```
//!
//! # Commands
//!
//! - `login` / `signup` / `logout` / `whoami` - Session management
//! - `company` - List, create and select companies
//! - `invite` - Accept or send invitations
//! - `tasks` - List, board, calendar, create and update tasks
//! - `departments` - List and create departments
//! - `profile upload` - Upload a profile picture
//! - `pricing` - Show subscription plans
//! - `admin console` - Platform overview for the super-admin account
//!
//! Configuration comes from `WORKPRO_API_URL`, `WORKPRO_SESSION_FILE` and
//! `WORKPRO_SUPER_ADMIN_EMAIL` (see `workpro_client::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "wp-cli")]
#[command(author, version, about = "WorkPro command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "WORKPRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "WORKPRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and selected company
    Whoami {
        /// Refresh the profile from the backend first
        #[arg(long)]
        refresh: bool,
    },
    /// Manage companies
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Company invitations
    Invite {
        #[command(subcommand)]
        action: InviteAction,
    },
    /// Work with tasks of the selected company
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Departments of the selected company
    Departments {
        #[command(subcommand)]
        action: DepartmentAction,
    },
    /// Manage the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show subscription plans
    Pricing,
    /// Super-admin tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CompanyAction {
    /// List companies you belong to
    List,
    /// Create a company and select it
    Create {
        /// Company name
        name: String,
    },
    /// Select the company to work in
    Select {
        /// Company ID
        id: String,

        /// Role to assume when the backend does not report one
        /// (`owner`, `manager`, `employee`)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Stop working in the selected company
    Deselect,
}

#[derive(Subcommand)]
enum InviteAction {
    /// Accept an invitation
    Accept {
        /// Invitation token from the invite link
        token: String,
    },
    /// Invite someone into the selected company
    Send {
        /// Invitee email address
        #[arg(short, long)]
        email: String,

        /// Role to grant (`manager`, `employee`)
        #[arg(short, long, default_value = "employee")]
        role: String,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List all tasks
    List,
    /// Show tasks grouped by status column
    Board,
    /// Show a month calendar of due dates
    Calendar {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },
    /// List tasks assigned to you
    Mine,
    /// Create a task
    Create {
        /// Task title
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Priority label, e.g. `high`
        #[arg(long)]
        priority: Option<String>,

        /// Due date (`YYYY-MM-DD`)
        #[arg(long)]
        due: Option<String>,

        /// Assignee user IDs
        #[arg(long = "assign")]
        assignees: Vec<String>,
    },
    /// Move a task to another status column
    Status {
        /// Task ID
        id: String,

        /// New status (`todo`, `in-progress`, `review`, `done`)
        status: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
enum DepartmentAction {
    /// List departments
    List,
    /// Create a department (owners and managers)
    Create {
        /// Department name
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Upload a profile picture
    Upload {
        /// Image file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show analytics, companies and plans
    Console,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wp_cli=info,workpro_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, &SecretString::from(password)).await?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = SecretString::from(password);
            commands::auth::signup(&ctx, &name, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami { refresh } => commands::auth::whoami(&ctx, refresh).await?,
        Commands::Company { action } => match action {
            CompanyAction::List => commands::company::list(&ctx).await,
            CompanyAction::Create { name } => commands::company::create(&ctx, &name).await?,
            CompanyAction::Select { id, role } => {
                commands::company::select(&ctx, &id, role.as_deref()).await?;
            }
            CompanyAction::Deselect => commands::company::deselect(&ctx)?,
        },
        Commands::Invite { action } => match action {
            InviteAction::Accept { token } => commands::invite::accept(&ctx, &token).await?,
            InviteAction::Send { email, role } => {
                commands::invite::send(&ctx, &email, &role).await?;
            }
        },
        Commands::Tasks { action } => match action {
            TaskAction::List => commands::tasks::list(&ctx).await,
            TaskAction::Board => commands::tasks::board(&ctx).await,
            TaskAction::Calendar { year, month } => {
                commands::tasks::calendar(&ctx, year, month).await?;
            }
            TaskAction::Mine => commands::tasks::mine(&ctx).await,
            TaskAction::Create {
                title,
                description,
                priority,
                due,
                assignees,
            } => {
                let input = commands::tasks::CreateInput {
                    title,
                    description,
                    priority,
                    due,
                    assignees,
                };
                commands::tasks::create(&ctx, input).await?;
            }
            TaskAction::Status { id, status } => {
                commands::tasks::set_status(&ctx, &id, &status).await?;
            }
            TaskAction::Delete { id } => commands::tasks::delete(&ctx, &id).await?,
        },
        Commands::Departments { action } => match action {
            DepartmentAction::List => commands::departments::list(&ctx).await,
            DepartmentAction::Create { name, description } => {
                commands::departments::create(&ctx, name, description).await?;
            }
        },
        Commands::Profile { action } => match action {
            ProfileAction::Upload { file } => commands::profile::upload(&ctx, &file).await?,
        },
        Commands::Pricing => commands::pricing::list(&ctx).await,
        Commands::Admin { action } => match action {
            AdminAction::Console => commands::admin::console(&ctx).await?,
        },
    }
    Ok(())
}
