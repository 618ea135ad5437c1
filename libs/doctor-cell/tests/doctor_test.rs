use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::DoctorApi;
use shared_config::endpoints;
use shared_utils::test_utils::{test_client, MockApiResponses, TestSession, TestUser};

fn doctor_api(server: &MockServer) -> DoctorApi {
    let doctor = TestUser::doctor("doctor@example.com");
    DoctorApi::new(test_client(&server.uri(), TestSession::logged_in(&doctor, "acc", "ref")))
}

#[tokio::test]
async fn test_get_appointments_with_filters() {
    let mock_server = MockServer::start().await;
    let api = doctor_api(&mock_server);

    Mock::given(method("GET"))
        .and(path(endpoints::DOCTOR_APPOINTMENTS))
        .and(query_param("status", "scheduled"))
        .and(query_param("date", "2025-03-14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::appointment_response(1, 7)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api
        .get_appointments(&json!({"status": "scheduled", "date": "2025-03-14", "search": ""}))
        .await;

    assert!(response.is_success());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=scheduled&date=2025-03-14"));
}

#[tokio::test]
async fn test_add_medication_for_patient() {
    let mock_server = MockServer::start().await;
    let api = doctor_api(&mock_server);
    let medication = json!({"name": "Amoxicillin", "dosage": "500mg", "frequency": "3x daily"});

    Mock::given(method("POST"))
        .and(path(endpoints::doctor_patient_add_medication(5)))
        .and(header("Authorization", "Bearer acc"))
        .and(body_json(&medication))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 44})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api.add_medication(5, medication).await;
    assert_eq!(response.data(), Some(&json!({"id": 44})));
}

#[tokio::test]
async fn test_update_availability_uses_put() {
    let mock_server = MockServer::start().await;
    let api = doctor_api(&mock_server);
    let schedule = json!({"monday": [{"start": "09:00", "end": "12:00"}]});

    Mock::given(method("PUT"))
        .and(path(endpoints::DOCTOR_AVAILABILITY))
        .and(body_json(&schedule))
        .respond_with(ResponseTemplate::new(200).set_body_json(&schedule))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(api.update_availability(schedule).await.is_success());
}

#[tokio::test]
async fn test_export_fhir_writes_bundle() {
    let mock_server = MockServer::start().await;
    let api = doctor_api(&mock_server);
    let dir = tempfile::tempdir().unwrap();
    let bundle = json!({"resourceType": "Bundle", "type": "collection", "entry": []});

    Mock::given(method("GET"))
        .and(path(endpoints::patient_fhir_export(8)))
        .and(header("Authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&bundle))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api.export_fhir(8, dir.path()).await;

    assert!(response.is_success());
    let written = std::fs::read(dir.path().join("patient_8_fhir.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(parsed, bundle);
}

#[tokio::test]
async fn test_export_fhir_failure() {
    let mock_server = MockServer::start().await;
    let api = doctor_api(&mock_server);
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(endpoints::patient_fhir_export(8)))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(MockApiResponses::detail_error("You do not have permission to perform this action."))
        )
        .mount(&mock_server)
        .await;

    let response = api.export_fhir(8, dir.path()).await;

    assert_eq!(response.error(), Some("You do not have permission to perform this action."));
    assert!(!dir.path().join("patient_8_fhir.json").exists());
}
