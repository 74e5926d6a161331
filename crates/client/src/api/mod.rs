//! Typed WorkPro endpoints.
//!
//! Each submodule adds methods to [`ApiClient`] for one area of the backend.
//! All of them go through [`ApiClient::send`], so token handling and logging
//! are never repeated here.
//!
//! Company-scoped reads return [`CompanyScoped::NoCompany`] without touching
//! the network when no company is selected; the caller shows onboarding.

pub mod admin;
pub mod auth;
pub mod companies;
pub mod departments;
pub mod invitations;
pub mod pricing;
pub mod profile;
pub mod tasks;

use tracing::debug;
use workpro_core::CompanyId;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Result of a read that needs a selected company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyScoped<T> {
    /// Data for the selected company.
    Ready(T),
    /// No company selected; nothing was requested.
    NoCompany,
}

impl<T> CompanyScoped<T> {
    /// The data, if a company was selected.
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::NoCompany => None,
        }
    }

    /// Transform the data, keeping `NoCompany` as is.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CompanyScoped<U> {
        match self {
            Self::Ready(value) => CompanyScoped::Ready(f(value)),
            Self::NoCompany => CompanyScoped::NoCompany,
        }
    }
}

impl ApiClient {
    /// Selected company for a read, or `None` after logging why nothing is fetched.
    pub(crate) fn scoped_company(&self, what: &str) -> Result<Option<CompanyId>, ApiError> {
        let company = self.session().company_id()?;
        if company.is_none() {
            debug!(what, "No company selected, skipping company-scoped fetch");
        }
        Ok(company)
    }

    /// Selected company for a mutation; a missing company is a setup error.
    pub(crate) fn required_company(&self) -> Result<CompanyId, ApiError> {
        self.session()
            .company_id()?
            .ok_or_else(|| ApiError::Setup {
                message: "no company selected".to_owned(),
            })
    }
}

/// Percent-encode an ID for use as one path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
