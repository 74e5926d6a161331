//! Super-admin console data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Company, PricingPlan};

/// Platform-wide counters from the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    #[serde(default)]
    pub total_companies: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_subscriptions: u64,
    #[serde(default)]
    pub monthly_revenue: Decimal,
    /// Chart series and any other backend fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything the console shows, loaded together.
///
/// A section whose fetch failed is empty; the failure was already logged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminConsole {
    pub analytics: Option<PlatformAnalytics>,
    pub companies: Vec<Company>,
    pub plans: Vec<PricingPlan>,
}
