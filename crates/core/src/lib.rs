//! WorkPro Core - Shared types library.
//!
//! This crate provides common types used across all WorkPro client components:
//! - `client` - HTTP client, session store and typed endpoint wrappers
//! - `cli` - Command-line front end (`wp-cli`)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. Anything that touches the network or the filesystem lives in
//! `workpro-client`.
//!
//! # Modules
//!
//! - [`types`] - String-backed IDs, company roles, emails, user profiles and
//!   session key names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
