//! Company listing, creation and selection.

use serde::Serialize;
use tracing::{info, instrument};
use workpro_core::{CompanyId, CompanyRole};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::Company;

#[derive(Serialize)]
struct CreateCompanyRequest<'a> {
    name: &'a str,
}

impl ApiClient {
    /// Companies the signed-in user belongs to, with their role in each.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_my_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.send_json(self.get("/api/companies/mine")).await
    }

    /// Create a company and select it as its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the session cannot be written.
    #[instrument(skip(self))]
    pub async fn create_company(&self, name: &str) -> Result<Company, ApiError> {
        let company: Company = self
            .send_json(self.post("/api/companies").json(&CreateCompanyRequest { name }))
            .await?;

        self.select_company(&company.id, CompanyRole::Owner)?;
        Ok(company)
    }

    /// Make `id` the selected company.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the session cannot be written.
    pub fn select_company(&self, id: &CompanyId, role: CompanyRole) -> Result<(), ApiError> {
        self.session().set_company(id, role)?;
        info!(company_id = %id, role = %role, "Company selected");
        Ok(())
    }
}
