//! CLI command implementations.
//!
//! Reads (lists, boards, the admin console) log the failure and show the empty
//! state, the same as a screen whose background load failed. Mutations turn
//! the failure into the user-facing message and fail the command.

pub mod admin;
pub mod auth;
pub mod company;
pub mod departments;
pub mod invite;
pub mod pricing;
pub mod profile;
pub mod tasks;

use thiserror::Error;
use workpro_client::{
    ApiClient, ApiError, ClientConfig, CompanyContext, ConfigError, FileStore, SessionContext,
    SessionError, TaskStatusParseError, to_user_message,
};
use workpro_core::{EmailError, RoleParseError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Client setup failed.
    #[error(transparent)]
    Client(#[from] ApiError),

    /// The stored session could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A backend action failed; carries the message meant for the user.
    #[error("{0}")]
    Action(String),

    /// Invalid email argument.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid role argument.
    #[error(transparent)]
    InvalidRole(#[from] RoleParseError),

    /// Invalid task status argument.
    #[error(transparent)]
    InvalidStatus(#[from] TaskStatusParseError),

    /// Any other invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The action needs a selected company.
    #[error("No company selected. Run `wp-cli company select <id>` first.")]
    NoCompany,

    /// The signed-in user's role does not allow the action.
    #[error("Only company owners and managers can do that")]
    NotPermitted,

    /// The admin console is for the platform super admin only.
    #[error("Only the platform administrator can open the admin console")]
    NotSuperAdmin,

    /// The company is not one of the signed-in user's companies.
    #[error("You are not a member of company {0}")]
    NotAMember(String),

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Map a failed mutation to its user-facing message.
pub fn action_failed(fallback: &'static str) -> impl FnOnce(ApiError) -> CliError {
    move |error| CliError::Action(to_user_message(&error, fallback))
}

/// Everything a command needs.
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
}

impl Context {
    /// Load configuration and open the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the configuration is invalid or the client
    /// cannot be built.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let session = SessionContext::new(FileStore::new(config.session_file.clone()));
        let client = ApiClient::new(&config, session)?;
        Ok(Self { config, client })
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Selected company, or `CliError::NoCompany`.
    pub fn require_company(&self) -> Result<CompanyContext, CliError> {
        self.session()
            .company()?
            .ok_or(CliError::NoCompany)
    }
}
