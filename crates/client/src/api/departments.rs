//! Company departments.

use serde::Serialize;
use tracing::instrument;

use super::CompanyScoped;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Department, NewDepartment};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDepartmentRequest<'a> {
    #[serde(flatten)]
    department: &'a NewDepartment,
    company_id: &'a str,
}

impl ApiClient {
    /// Departments of the selected company.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unreadable or the API request fails.
    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> Result<CompanyScoped<Vec<Department>>, ApiError> {
        let Some(company_id) = self.scoped_company("departments")? else {
            return Ok(CompanyScoped::NoCompany);
        };

        let departments = self
            .send_json(self.get("/api/departments").query("companyId", company_id.as_str()))
            .await?;
        Ok(CompanyScoped::Ready(departments))
    }

    /// Create a department in the selected company.
    ///
    /// Only owners and managers are offered this action; the backend enforces it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Setup` if no company is selected, or an error if the
    /// API request fails.
    #[instrument(skip(self, department), fields(name = %department.name))]
    pub async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, ApiError> {
        let company_id = self.required_company()?;
        let request = self.post("/api/departments").json(&CreateDepartmentRequest {
            department,
            company_id: company_id.as_str(),
        });
        self.send_json(request).await
    }
}
