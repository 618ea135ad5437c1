use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{error, info};

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::{ApiError, ApiResponse};

pub struct DoctorApi {
    client: Arc<HealHubClient>,
}

impl DoctorApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    /// Directory of all doctors.
    pub async fn get_all(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::ADMIN_DOCTORS_LIST)).await
    }

    pub async fn get_dashboard(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::DOCTOR_DASHBOARD)).await
    }

    /// `params` is a JSON object of filters, e.g. `{"status": "scheduled", "date": "2025-03-14"}`.
    pub async fn get_appointments(&self, params: &Value) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::DOCTOR_APPOINTMENTS).query(params))
            .await
    }

    pub async fn get_appointment_detail(&self, appointment_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::doctor_appointment_detail(appointment_id)))
            .await
    }

    pub async fn update_appointment_status(&self, appointment_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::doctor_appointment_detail(appointment_id)).json(payload))
            .await
    }

    pub async fn get_patients(&self, params: &Value) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::DOCTOR_PATIENTS).query(params))
            .await
    }

    pub async fn get_patient_detail(&self, patient_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::get(endpoints::doctor_patient_detail(patient_id)))
            .await
    }

    // Availability

    pub async fn get_availability(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::DOCTOR_AVAILABILITY)).await
    }

    pub async fn update_availability(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::put(endpoints::DOCTOR_AVAILABILITY).json(payload))
            .await
    }

    pub async fn add_availability_slot(&self, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::DOCTOR_AVAILABILITY_ADD_SLOT).json(payload))
            .await
    }

    pub async fn update_availability_slot(&self, slot_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::patch(endpoints::doctor_availability_slot_detail(slot_id)).json(payload))
            .await
    }

    pub async fn delete_availability_slot(&self, slot_id: impl Display) -> ApiResponse {
        self.client
            .call(ApiRequest::delete(endpoints::doctor_availability_slot_detail(slot_id)))
            .await
    }

    // Records added on behalf of a patient

    pub async fn add_medical_history(&self, patient_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::doctor_patient_add_history(patient_id)).json(payload))
            .await
    }

    pub async fn add_allergy(&self, patient_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::doctor_patient_add_allergy(patient_id)).json(payload))
            .await
    }

    pub async fn add_medication(&self, patient_id: impl Display, payload: Value) -> ApiResponse {
        self.client
            .call(ApiRequest::post(endpoints::doctor_patient_add_medication(patient_id)).json(payload))
            .await
    }

    /// Downloads the patient's FHIR bundle into `dir` as `patient_<id>_fhir.json`.
    pub async fn export_fhir(&self, patient_id: impl Display, dir: &Path) -> ApiResponse {
        let bytes = match self.client
            .download(ApiRequest::get(endpoints::patient_fhir_export(&patient_id)))
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("FHIR export failed for patient {}: {}", patient_id, e);
                return ApiResponse::failure(&e);
            }
        };

        let target = dir.join(format!("patient_{}_fhir.json", patient_id));
        if let Err(e) = tokio::fs::write(&target, &bytes).await {
            let err = ApiError::Storage(format!("failed to write {}: {}", target.display(), e));
            error!("{}", err);
            return ApiResponse::failure(&err);
        }

        info!("Exported FHIR bundle for patient {} to {}", patient_id, target.display());
        ApiResponse::success(Some(json!({
            "path": target.display().to_string(),
            "bytes": bytes.len(),
        })))
    }
}
