use std::fmt::Display;
use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::ApiResponse;

/// Booking flow: departments, doctors, free slots, and appointment lifecycle.
pub struct AppointmentApi {
    client: Arc<HealHubClient>,
}

impl AppointmentApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &Value) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::APPOINTMENTS).query(params))
            .await
    }

    pub async fn detail(&self, appointment_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::appointment_detail(appointment_id)))
            .await
    }

    pub async fn create(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::APPOINTMENT_SCHEDULE).json(payload))
            .await
    }

    /// `payload` may carry a `cancellation_reason`; `None` sends `{}`.
    pub async fn cancel(&self, appointment_id: impl Display, payload: Option<Value>) -> ApiResponse {
        self.client
            .call(
                ApiRequest::patch(endpoints::appointment_cancel(appointment_id))
                    .json(payload.unwrap_or_else(|| json!({}))),
            )
            .await
    }

    pub async fn reschedule(&self, appointment_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::appointment_reschedule(appointment_id)).json(payload))
            .await
    }

    pub async fn get_available_slots(&self, params: &Value) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::APPOINTMENT_AVAILABLE_SLOTS).query(params))
            .await
    }

    pub async fn get_departments(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::APPOINTMENT_DEPARTMENTS)).await
    }

    pub async fn get_doctors_by_department(&self, department: &str) -> ApiResponse {
        self.client
            .call(
                ApiRequest::get(endpoints::APPOINTMENT_DOCTORS_BY_DEPARTMENT)
                    .query(&json!({ "department": department })),
            )
            .await
    }
}
