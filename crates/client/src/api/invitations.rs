//! Invitations into a company.

use serde::Serialize;
use tracing::instrument;
use workpro_core::{CompanyRole, Email};

use super::segment;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::InvitationAcceptance;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequest<'a> {
    email: &'a str,
    role: CompanyRole,
    company_id: &'a str,
}

impl ApiClient {
    /// Accept an invitation and select the company it grants.
    ///
    /// # Errors
    ///
    /// Returns an error if the invitation is rejected or the session cannot be written.
    #[instrument(skip(self, invite_token))]
    pub async fn accept_invitation(
        &self,
        invite_token: &str,
    ) -> Result<InvitationAcceptance, ApiError> {
        let path = format!("/api/invitations/{}/accept", segment(invite_token));
        let acceptance: InvitationAcceptance = self.send_json(self.post(path)).await?;

        self.select_company(&acceptance.company.id, acceptance.role)?;
        Ok(acceptance)
    }

    /// Invite `email` into the selected company.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Setup` if no company is selected, or an error if the
    /// API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn send_invitation(&self, email: &Email, role: CompanyRole) -> Result<(), ApiError> {
        let company_id = self.required_company()?;
        let request = self.post("/api/invitations").json(&InviteRequest {
            email: email.as_str(),
            role,
            company_id: company_id.as_str(),
        });
        self.send(request).await?;
        Ok(())
    }
}
