use std::sync::Arc;

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::ApiResponse;

pub struct HospitalApi {
    client: Arc<HealHubClient>,
}

impl HospitalApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    pub async fn get_hospitals(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::HOSPITALS)).await
    }
}
