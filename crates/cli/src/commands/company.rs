//! Company commands.

use workpro_client::Company;
use workpro_core::{CompanyId, CompanyRole};

use super::{CliError, Context, action_failed};

/// List the user's companies, marking the selected one.
pub async fn list(ctx: &Context) {
    let companies = match ctx.client.list_my_companies().await {
        Ok(companies) => companies,
        Err(e) => {
            tracing::warn!("Failed to load companies: {e}");
            Vec::new()
        }
    };

    if companies.is_empty() {
        tracing::info!("No companies yet. Create one with `wp-cli company create <name>`.");
        return;
    }

    let selected = ctx.session().company_id().ok().flatten();
    for company in &companies {
        let marker = if selected.as_ref() == Some(&company.id) { "*" } else { " " };
        let role = company.role.map_or("-", CompanyRole::as_str);
        tracing::info!("{marker} {} {} ({role})", company.id, company.name);
    }
}

/// Create a company and select it.
pub async fn create(ctx: &Context, name: &str) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidArgument("company name cannot be empty".to_owned()));
    }

    let company = ctx
        .client
        .create_company(name)
        .await
        .map_err(action_failed("Could not create company"))?;
    tracing::info!("Created {} ({}); you are its owner", company.name, company.id);
    Ok(())
}

/// Select the company to work in.
///
/// The role comes from the membership listing. `fallback_role` is only used
/// when the backend lists the company without one.
pub async fn select(ctx: &Context, id: &str, fallback_role: Option<&str>) -> Result<(), CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::InvalidArgument("company id cannot be empty".to_owned()));
    }
    let fallback_role = fallback_role.map(str::parse::<CompanyRole>).transpose()?;

    let companies = ctx
        .client
        .list_my_companies()
        .await
        .map_err(action_failed("Could not load companies"))?;
    let role = membership_role(&companies, id, fallback_role)?;

    ctx.client.select_company(&CompanyId::new(id), role)?;
    tracing::info!("Now working in {id} as {role}");
    Ok(())
}

/// Role the user holds in company `id`, per the listing.
fn membership_role(
    companies: &[Company],
    id: &str,
    fallback: Option<CompanyRole>,
) -> Result<CompanyRole, CliError> {
    let company = companies
        .iter()
        .find(|company| company.id.as_str() == id)
        .ok_or_else(|| CliError::NotAMember(id.to_owned()))?;

    Ok(company
        .role
        .or(fallback)
        .unwrap_or(CompanyRole::Employee))
}

/// Forget the selected company; the session stays signed in.
pub fn deselect(ctx: &Context) -> Result<(), CliError> {
    ctx.session().clear_company()?;
    tracing::info!("No company selected");
    Ok(())
}
