//! Super-admin console.
//!
//! Only offered to the account named by `WORKPRO_SUPER_ADMIN_EMAIL`. The check
//! is routing only; the backend decides what the admin endpoints return.

use super::{CliError, Context};

/// Show platform analytics, all companies and the pricing plans.
pub async fn console(ctx: &Context) -> Result<(), CliError> {
    if !ctx.session().is_super_admin(ctx.config.super_admin_email.as_ref()) {
        return Err(CliError::NotSuperAdmin);
    }

    let console = ctx.client.load_admin_console().await;

    match &console.analytics {
        Some(stats) => {
            tracing::info!(
                "Companies: {}  Users: {}  Active subscriptions: {}",
                stats.total_companies,
                stats.total_users,
                stats.active_subscriptions
            );
            tracing::info!("Monthly revenue: ${:.2}", stats.monthly_revenue);
        }
        None => tracing::info!("Analytics unavailable"),
    }

    tracing::info!("== Companies ({}) ==", console.companies.len());
    for company in &console.companies {
        tracing::info!("  {} {}", company.id, company.name);
    }

    tracing::info!("== Plans ({}) ==", console.plans.len());
    for plan in &console.plans {
        tracing::info!("  {} {}", plan.name, plan.price_label());
    }
    Ok(())
}
