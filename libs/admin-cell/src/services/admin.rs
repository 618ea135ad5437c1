use std::fmt::Display;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::ApiResponse;

use crate::models::{CancelAppointmentRequest, ResetPasswordRequest};

/// Hospital administration: accounts, staff and patient registration, appointments.
pub struct AdminApi {
    client: Arc<HealHubClient>,
}

impl AdminApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    pub async fn get_dashboard_stats(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_DASHBOARD_STATS)).await
    }

    // Users

    pub async fn get_users(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_USERS)).await
    }

    pub async fn create_user(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::ADMIN_CREATE_USER).json(payload))
            .await
    }

    pub async fn get_user_detail(&self, user_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::admin_user_detail(user_id))).await
    }

    pub async fn update_user(&self, user_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::admin_user_detail(user_id)).json(payload))
            .await
    }

    pub async fn delete_user(&self, user_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::delete(endpoints::admin_user_detail(user_id))).await
    }

    pub async fn reset_password(&self, user_id: impl Display, new_password: &str) -> ApiResponse {
        debug!("Resetting password for user {}", user_id);
        let body = ResetPasswordRequest {
            new_password: new_password.to_string(),
        };

        self.client
            .call(ApiRequest::post(endpoints::admin_reset_password(user_id)).json(json!(body)))
            .await
    }

    // Doctors

    pub async fn get_doctors_list(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_DOCTORS_LIST)).await
    }

    pub async fn get_doctor(&self, doctor_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::admin_doctor_detail(doctor_id))).await
    }

    pub async fn register_doctor(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::ADMIN_REGISTER_DOCTOR).json(payload))
            .await
    }

    pub async fn update_doctor(&self, doctor_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::admin_doctor_detail(doctor_id)).json(payload))
            .await
    }

    pub async fn delete_doctor(&self, doctor_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::delete(endpoints::admin_doctor_detail(doctor_id))).await
    }

    // Patients

    pub async fn get_patients_list(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_PATIENTS_LIST)).await
    }

    pub async fn get_patient(&self, patient_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::admin_patient_detail(patient_id))).await
    }

    pub async fn register_patient(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::ADMIN_REGISTER_PATIENT).json(payload))
            .await
    }

    pub async fn update_patient(&self, patient_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::admin_patient_detail(patient_id)).json(payload))
            .await
    }

    pub async fn delete_patient(&self, patient_id: impl Display) -> ApiResponse {
        self.client.call(ApiRequest::delete(endpoints::admin_patient_detail(patient_id))).await
    }

    // Appointments

    pub async fn get_appointments(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_APPOINTMENTS)).await
    }

    pub async fn delete_appointment(&self, appointment_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::delete(endpoints::appointment_detail(appointment_id)))
            .await
    }

    pub async fn cancel_appointment(
        &self,
        appointment_id: impl Display,
        cancellation_reason: &str,
    ) -> ApiResponse {
        let body = CancelAppointmentRequest {
            cancellation_reason: cancellation_reason.to_string(),
        };

        self.client
            .call(ApiRequest::patch(endpoints::appointment_cancel(appointment_id)).json(json!(body)))
            .await
    }
}
