use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use admin_cell::AdminApi;
use appointment_cell::AppointmentApi;
use auth_cell::AuthApi;
use doctor_cell::DoctorApi;
use owner_cell::{HospitalApi, OwnerApi};
use patient_cell::PatientApi;
use shared_http::HealHubClient;
use shared_models::ApiResponse;

use crate::{export_dir, query_from_pairs};

pub const USAGE: &str = "\
usage: healhub <command> [args]

  login                      uses HEALHUB_EMAIL, HEALHUB_PASSWORD, HEALHUB_ROLE
  logout
  whoami
  profile
  refresh
  departments
  doctors-by-department <name>
  slots [key=value ...]
  appointments [key=value ...]
  schedule <json>
  cancel <appointment-id> [reason]
  patient-dashboard
  doctor-dashboard
  export-fhir <patient-id>      writes into HEALHUB_EXPORT_DIR (default .)
  admin-stats
  owner-stats
  hospitals";

fn arg<'a>(rest: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    rest.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{}>", name))
}

pub async fn run(client: Arc<HealHubClient>, command: &str, rest: &[String]) -> Result<ApiResponse> {
    let response = match command {
        "login" => {
            let email = env::var("HEALHUB_EMAIL").context("HEALHUB_EMAIL must be set")?;
            let password = env::var("HEALHUB_PASSWORD").context("HEALHUB_PASSWORD must be set")?;
            let role = env::var("HEALHUB_ROLE").ok();
            AuthApi::new(client).login(&email, &password, role.as_deref()).await
        }
        "logout" => AuthApi::new(client).logout().await,
        "whoami" => {
            let auth = AuthApi::new(client);
            let user = auth.current_user().await;
            ApiResponse::success(Some(serde_json::json!({
                "authenticated": auth.is_authenticated().await,
                "role": auth.user_role().await,
                "name": user.as_ref().and_then(|u| u.display_name()),
                "user": user,
            })))
        }
        "profile" => AuthApi::new(client).get_profile().await,
        "refresh" => client.refresh_token().await,
        "departments" => AppointmentApi::new(client).get_departments().await,
        "doctors-by-department" => {
            let department = arg(rest, 0, "name")?;
            AppointmentApi::new(client).get_doctors_by_department(department).await
        }
        "slots" => AppointmentApi::new(client).get_available_slots(&query_from_pairs(rest)).await,
        "appointments" => AppointmentApi::new(client).list(&query_from_pairs(rest)).await,
        "schedule" => {
            let payload: Value = serde_json::from_str(arg(rest, 0, "json")?)
                .context("appointment payload must be JSON")?;
            AppointmentApi::new(client).create(payload).await
        }
        "cancel" => {
            let id = arg(rest, 0, "appointment-id")?;
            let payload = rest
                .get(1)
                .map(|reason| serde_json::json!({ "cancellation_reason": reason }));
            AppointmentApi::new(client).cancel(id, payload).await
        }
        "patient-dashboard" => PatientApi::new(client).get_profile().await,
        "doctor-dashboard" => DoctorApi::new(client).get_dashboard().await,
        "export-fhir" => {
            let id = arg(rest, 0, "patient-id")?;
            DoctorApi::new(client).export_fhir(id, &export_dir()).await
        }
        "admin-stats" => AdminApi::new(client).get_dashboard_stats().await,
        "owner-stats" => OwnerApi::new(client).get_dashboard_stats().await,
        "hospitals" => HospitalApi::new(client).get_hospitals().await,
        other => {
            eprintln!("{}", USAGE);
            return Err(anyhow!("unknown command: {}", other));
        }
    };

    Ok(response)
}
