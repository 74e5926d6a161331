//! Invitation commands.

use workpro_core::{CompanyRole, Email};

use super::{CliError, Context, action_failed};

/// Accept an invitation and switch to its company.
pub async fn accept(ctx: &Context, token: &str) -> Result<(), CliError> {
    let acceptance = ctx
        .client
        .accept_invitation(token.trim())
        .await
        .map_err(action_failed("Could not accept invitation"))?;

    tracing::info!(
        "Joined {} as {}",
        acceptance.company.name,
        acceptance.role
    );
    Ok(())
}

/// Invite someone into the selected company.
pub async fn send(ctx: &Context, email: &str, role: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let role: CompanyRole = role.parse()?;

    let company = ctx.require_company()?;
    if !company.can_manage() {
        return Err(CliError::NotPermitted);
    }

    ctx.client
        .send_invitation(&email, role)
        .await
        .map_err(action_failed("Could not send invitation"))?;
    tracing::info!("Invitation sent to {email}");
    Ok(())
}
