use std::sync::Arc;

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::ApiResponse;

/// Read-only analytics for the hospital owner portal.
pub struct OwnerApi {
    client: Arc<HealHubClient>,
}

impl OwnerApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    pub async fn get_dashboard_stats(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::OWNER_DASHBOARD_STATS)).await
    }

    pub async fn get_doctor_performance(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::OWNER_DOCTOR_PERFORMANCE)).await
    }

    pub async fn get_hospital_analytics(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::OWNER_HOSPITAL_ANALYTICS)).await
    }

    pub async fn get_upcoming_appointments(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::OWNER_UPCOMING_APPOINTMENTS)).await
    }
}
