//! Pricing command. Works signed out.

use super::Context;

/// Show the subscription plans.
pub async fn list(ctx: &Context) {
    let plans = ctx.client.list_pricing_plans().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load pricing: {e}");
        Vec::new()
    });

    if plans.is_empty() {
        tracing::info!("No plans available");
        return;
    }

    for plan in &plans {
        let seats = plan
            .max_users
            .map_or_else(|| "unlimited users".to_owned(), |n| format!("up to {n} users"));
        tracing::info!("{}: {} ({seats})", plan.name, plan.price_label());
        for feature in &plan.features {
            tracing::info!("  - {feature}");
        }
    }
}
