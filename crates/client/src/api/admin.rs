//! Platform administration console.

use tracing::{instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AdminConsole, Company, PlatformAnalytics};

impl ApiClient {
    /// Platform-wide counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn platform_analytics(&self) -> Result<PlatformAnalytics, ApiError> {
        self.send_json(self.get("/api/admin/analytics")).await
    }

    /// Every company on the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn all_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.send_json(self.get("/api/admin/companies")).await
    }

    /// Load the console sections concurrently.
    ///
    /// A failed section is logged and left empty so the rest still render.
    #[instrument(skip(self))]
    pub async fn load_admin_console(&self) -> AdminConsole {
        let (analytics, companies, plans) = tokio::join!(
            self.platform_analytics(),
            self.all_companies(),
            self.list_pricing_plans(),
        );

        AdminConsole {
            analytics: analytics
                .inspect_err(|e| warn!(error = %e, "Failed to load analytics"))
                .ok(),
            companies: companies
                .inspect_err(|e| warn!(error = %e, "Failed to load companies"))
                .unwrap_or_default(),
            plans: plans
                .inspect_err(|e| warn!(error = %e, "Failed to load pricing plans"))
                .unwrap_or_default(),
        }
    }
}
