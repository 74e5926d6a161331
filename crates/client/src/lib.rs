//! WorkPro client library.
//!
//! HTTP access to the WorkPro backend plus the persisted session context
//! (token, user and selected company) that every request reads from.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use workpro_client::{ApiClient, ClientConfig, FileStore, SessionContext};
//!
//! let config = ClientConfig::from_env()?;
//! let session = SessionContext::new(FileStore::new(config.session_file.clone()));
//! let client = ApiClient::new(&config, session)?;
//!
//! let plans = client.list_pricing_plans().await?;
//! # let _ = plans;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch_guard;
pub mod interceptor;
pub mod request;
pub mod session;
pub mod types;

pub use api::CompanyScoped;
pub use client::{ApiClient, ApiResponse};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorResponse, to_user_message};
pub use fetch_guard::{FetchGuard, FetchTicket};
pub use request::{ApiRequest, MultipartForm, RequestBody, RequestSummary};
pub use session::{
    CompanyContext, FileStore, MemoryStore, SessionContext, SessionError, SessionStore,
};
pub use types::*;
