//! Public pricing plans.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use workpro_core::PlanId;

/// A subscription plan, listed without authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    #[serde(rename = "_id", alias = "id")]
    pub id: PlanId,
    pub name: String,
    /// Price per billing interval.
    pub price: Decimal,
    /// Billing interval, e.g. `month`.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Seat limit; `None` means unlimited.
    #[serde(default)]
    pub max_users: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_interval() -> String {
    "month".to_owned()
}

impl PricingPlan {
    /// Price line as shown in plan listings, e.g. `$19.99/month`.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("${:.2}/{}", self.price, self.interval)
    }
}
