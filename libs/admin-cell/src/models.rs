use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelAppointmentRequest {
    pub cancellation_reason: String,
}
