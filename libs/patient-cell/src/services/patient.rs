use std::fmt::Display;
use std::sync::Arc;

use serde_json::Value;

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::ApiResponse;

/// The signed-in patient's own records.
pub struct PatientApi {
    client: Arc<HealHubClient>,
}

impl PatientApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    /// Dashboard payload, which doubles as the patient profile.
    pub async fn get_profile(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PATIENT_DASHBOARD)).await
    }

    pub async fn get_medical_history(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PATIENT_MEDICAL_HISTORY)).await
    }

    pub async fn add_medical_history(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::PATIENT_MEDICAL_HISTORY).json(payload))
            .await
    }

    pub async fn update_medical_history(&self, history_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::patient_medical_history_detail(history_id)).json(payload))
            .await
    }

    pub async fn delete_medical_history(&self, history_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::delete(endpoints::patient_medical_history_detail(history_id)))
            .await
    }

    pub async fn get_allergies(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PATIENT_ALLERGIES)).await
    }

    pub async fn add_allergy(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::PATIENT_ALLERGIES).json(payload))
            .await
    }

    pub async fn update_allergy(&self, allergy_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::patient_allergy_detail(allergy_id)).json(payload))
            .await
    }

    pub async fn delete_allergy(&self, allergy_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::delete(endpoints::patient_allergy_detail(allergy_id)))
            .await
    }

    pub async fn get_medications(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PATIENT_MEDICATIONS)).await
    }

    pub async fn add_medication(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::PATIENT_MEDICATIONS).json(payload))
            .await
    }

    pub async fn update_medication(&self, medication_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::patient_medication_detail(medication_id)).json(payload))
            .await
    }

    pub async fn delete_medication(&self, medication_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::delete(endpoints::patient_medication_detail(medication_id)))
            .await
    }

    pub async fn get_appointments(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PATIENT_APPOINTMENTS)).await
    }
}
