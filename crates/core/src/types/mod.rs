//! Core types for WorkPro.
//!
//! This module provides type-safe wrappers for the tenant and session concepts
//! every consumer of the backend shares.

pub mod email;
pub mod id;
pub mod profile;
pub mod role;
pub mod session;

pub use email::{Email, EmailError};
pub use id::*;
pub use profile::UserProfile;
pub use role::{CompanyRole, RoleParseError};
pub use session::{SessionKey, is_absent_sentinel, normalize_stored};
