use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::AppointmentApi;
use shared_config::endpoints;
use shared_utils::test_utils::{test_client, MockApiResponses, TestSession, TestUser};

fn appointment_api(server: &MockServer) -> AppointmentApi {
    let patient = TestUser::patient("patient@example.com");
    AppointmentApi::new(test_client(&server.uri(), TestSession::logged_in(&patient, "acc", "ref")))
}

#[tokio::test]
async fn test_schedule_appointment() {
    let mock_server = MockServer::start().await;
    let api = appointment_api(&mock_server);
    let payload = json!({
        "doctor": 7,
        "appointment_date": "2025-03-14",
        "appointment_time": "10:30",
        "reason": "Checkup"
    });

    Mock::given(method("POST"))
        .and(path(endpoints::APPOINTMENT_SCHEDULE))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockApiResponses::appointment_response(11, 7))
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api.create(payload).await;

    assert!(response.is_success());
    assert_eq!(response.data().unwrap()["id"], 11);
}

#[tokio::test]
async fn test_slot_conflict_message() {
    let mock_server = MockServer::start().await;
    let api = appointment_api(&mock_server);

    Mock::given(method("PATCH"))
        .and(path(endpoints::appointment_reschedule(11)))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "This time slot is no longer available"
        })))
        .mount(&mock_server)
        .await;

    let response = api
        .reschedule(11, json!({"appointment_date": "2025-03-15", "appointment_time": "09:00"}))
        .await;

    assert_eq!(response.error(), Some("This time slot is no longer available"));
    assert_eq!(response.status(), Some(409));
}

#[tokio::test]
async fn test_cancel_without_reason_sends_empty_object() {
    let mock_server = MockServer::start().await;
    let api = appointment_api(&mock_server);

    Mock::given(method("PATCH"))
        .and(path(endpoints::appointment_cancel(11)))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "cancelled"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(api.cancel(11, None).await.is_success());
}

#[tokio::test]
async fn test_doctors_by_department_query() {
    let mock_server = MockServer::start().await;
    let api = appointment_api(&mock_server);

    Mock::given(method("GET"))
        .and(path(endpoints::APPOINTMENT_DOCTORS_BY_DEPARTMENT))
        .and(query_param("department", "Heart & Lungs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::doctor_response(7)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api.get_doctors_by_department("Heart & Lungs").await;
    assert_eq!(response.data().unwrap()[0]["id"], 7);
}

#[tokio::test]
async fn test_available_slots_drops_empty_filters() {
    let mock_server = MockServer::start().await;
    let api = appointment_api(&mock_server);

    Mock::given(method("GET"))
        .and(path(endpoints::APPOINTMENT_AVAILABLE_SLOTS))
        .and(query_param("doctor_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slots": ["09:00", "09:30"]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api
        .get_available_slots(&json!({"doctor_id": 7, "date": null, "department": ""}))
        .await;

    assert!(response.is_success());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("doctor_id=7"));
}
