//! Department commands.

use workpro_client::{CompanyScoped, NewDepartment};

use super::{CliError, Context, action_failed};

/// List departments of the selected company.
pub async fn list(ctx: &Context) {
    let departments = match ctx.client.list_departments().await {
        Ok(CompanyScoped::Ready(departments)) => departments,
        Ok(CompanyScoped::NoCompany) => {
            tracing::info!("No company selected. Create or join one to see departments.");
            return;
        }
        Err(e) => {
            tracing::warn!("Failed to load departments: {e}");
            Vec::new()
        }
    };

    if departments.is_empty() {
        tracing::info!("No departments");
        return;
    }
    for department in &departments {
        tracing::info!(
            "{} {} ({} members)",
            department.id,
            department.name,
            department.members.len()
        );
        if let Some(description) = &department.description {
            tracing::info!("  {description}");
        }
    }
}

/// Create a department. Owners and managers only.
pub async fn create(
    ctx: &Context,
    name: String,
    description: Option<String>,
) -> Result<(), CliError> {
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(CliError::InvalidArgument("department name cannot be empty".to_owned()));
    }

    let company = ctx.require_company()?;
    if !company.can_manage() {
        return Err(CliError::NotPermitted);
    }

    let department = ctx
        .client
        .create_department(&NewDepartment { name, description })
        .await
        .map_err(action_failed("Could not create department"))?;
    tracing::info!("Created department {} ({})", department.name, department.id);
    Ok(())
}
