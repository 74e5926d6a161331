//! Public pricing.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::PricingPlan;

impl ApiClient {
    /// List subscription plans. Works signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_pricing_plans(&self) -> Result<Vec<PricingPlan>, ApiError> {
        self.send_json(self.get("/api/pricing")).await
    }
}
