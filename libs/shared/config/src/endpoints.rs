//! Backend route table. Parameterised routes are functions of the resource id.

use std::fmt::Display;

// Authentication
pub const LOGIN: &str = "/api/accounts/login/";
pub const LOGOUT: &str = "/api/accounts/logout/";
pub const TOKEN_REFRESH: &str = "/api/accounts/token/refresh/";

// User profile
pub const PROFILE: &str = "/api/accounts/profile/";
pub const CHANGE_PASSWORD: &str = "/api/accounts/change-password/";

// Admin
pub const ADMIN_DASHBOARD_STATS: &str = "/api/accounts/admin/dashboard/stats/";
pub const ADMIN_USERS: &str = "/api/accounts/admin/users/";
pub const ADMIN_CREATE_USER: &str = "/api/accounts/admin/users/create/";
pub const ADMIN_REGISTER_PATIENT: &str = "/api/accounts/admin/register/patient/";
pub const ADMIN_REGISTER_DOCTOR: &str = "/api/accounts/admin/register/doctor/";
pub const ADMIN_DOCTORS_LIST: &str = "/api/accounts/admin/doctors/list/";
pub const ADMIN_PATIENTS_LIST: &str = "/api/accounts/admin/patients/list/";
pub const ADMIN_APPOINTMENTS: &str = "/api/appointments/";

pub fn admin_user_detail(id: impl Display) -> String {
    format!("/api/accounts/admin/users/{}/", id)
}

pub fn admin_reset_password(id: impl Display) -> String {
    format!("/api/accounts/admin/users/{}/reset-password/", id)
}

pub fn admin_doctor_detail(doctor_id: impl Display) -> String {
    format!("/api/accounts/admin/doctors/{}/", doctor_id)
}

pub fn admin_patient_detail(patient_id: impl Display) -> String {
    format!("/api/accounts/admin/patients/{}/", patient_id)
}

// Patients
pub const PATIENT_DASHBOARD: &str = "/api/patients/my/dashboard/";
pub const PATIENT_MEDICAL_HISTORY: &str = "/api/patients/my/medical-history/";
pub const PATIENT_ALLERGIES: &str = "/api/patients/my/allergies/";
pub const PATIENT_MEDICATIONS: &str = "/api/patients/my/medications/";
pub const PATIENT_APPOINTMENTS: &str = "/api/patients/my/appointments/";

pub fn patient_medical_history_detail(id: impl Display) -> String {
    format!("/api/patients/my/medical-history/{}/", id)
}

pub fn patient_allergy_detail(id: impl Display) -> String {
    format!("/api/patients/my/allergies/{}/", id)
}

pub fn patient_medication_detail(id: impl Display) -> String {
    format!("/api/patients/my/medications/{}/", id)
}

pub fn patient_fhir_export(patient_id: impl Display) -> String {
    format!("/api/patients/{}/export/fhir/", patient_id)
}

// Doctors
pub const DOCTOR_DASHBOARD: &str = "/api/doctors/my/dashboard/";
pub const DOCTOR_APPOINTMENTS: &str = "/api/doctors/my/appointments/";
pub const DOCTOR_PATIENTS: &str = "/api/doctors/my/patients/";
pub const DOCTOR_AVAILABILITY: &str = "/api/doctors/my/availability/";
pub const DOCTOR_AVAILABILITY_ADD_SLOT: &str = "/api/doctors/my/availability/add-slot/";

pub fn doctor_appointment_detail(id: impl Display) -> String {
    format!("/api/doctors/my/appointments/{}/", id)
}

pub fn doctor_patient_detail(id: impl Display) -> String {
    format!("/api/doctors/my/patients/{}/", id)
}

pub fn doctor_availability_slot_detail(slot_id: impl Display) -> String {
    format!("/api/doctors/my/availability/slots/{}/", slot_id)
}

pub fn doctor_patient_add_history(patient_id: impl Display) -> String {
    format!("/api/doctors/my/patients/{}/add-history/", patient_id)
}

pub fn doctor_patient_add_allergy(patient_id: impl Display) -> String {
    format!("/api/doctors/my/patients/{}/add-allergy/", patient_id)
}

pub fn doctor_patient_add_medication(patient_id: impl Display) -> String {
    format!("/api/doctors/my/patients/{}/add-medication/", patient_id)
}

// Appointments
pub const APPOINTMENTS: &str = "/api/appointments/";
pub const APPOINTMENT_SCHEDULE: &str = "/api/appointments/schedule/";
pub const APPOINTMENT_AVAILABLE_SLOTS: &str = "/api/appointments/available-slots/";
pub const APPOINTMENT_DEPARTMENTS: &str = "/api/appointments/departments/";
pub const APPOINTMENT_DOCTORS_BY_DEPARTMENT: &str = "/api/appointments/doctors-by-department/";

pub fn appointment_detail(id: impl Display) -> String {
    format!("/api/appointments/{}/", id)
}

pub fn appointment_cancel(id: impl Display) -> String {
    format!("/api/appointments/{}/cancel/", id)
}

pub fn appointment_reschedule(id: impl Display) -> String {
    format!("/api/appointments/{}/reschedule/", id)
}

// Owner
pub const OWNER_DASHBOARD_STATS: &str = "/api/accounts/owner/dashboard/stats/";
pub const OWNER_DOCTOR_PERFORMANCE: &str = "/api/accounts/owner/doctor-performance/";
pub const OWNER_HOSPITAL_ANALYTICS: &str = "/api/accounts/owner/hospital-analytics/";
pub const OWNER_UPCOMING_APPOINTMENTS: &str = "/api/accounts/owner/upcoming-appointments/";

// Hospitals
pub const HOSPITALS: &str = "/api/doctors/hospitals/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterised_routes() {
        assert_eq!(admin_reset_password(7), "/api/accounts/admin/users/7/reset-password/");
        assert_eq!(appointment_cancel("abc"), "/api/appointments/abc/cancel/");
        assert_eq!(doctor_availability_slot_detail(3), "/api/doctors/my/availability/slots/3/");
        assert_eq!(patient_fhir_export(42), "/api/patients/42/export/fhir/");
    }
}
