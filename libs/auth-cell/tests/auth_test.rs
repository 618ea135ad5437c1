use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::AuthApi;
use shared_config::endpoints;
use shared_http::session::keys;
use shared_http::SessionStore;
use shared_utils::test_utils::{test_client, MockApiResponses, TestSession, TestUser};

#[tokio::test]
async fn test_login_persists_session() {
    let mock_server = MockServer::start().await;
    let store = TestSession::empty();
    let auth = AuthApi::new(test_client(&mock_server.uri(), store.clone()));
    let user = TestUser::new("doc@example.com", "Doctor");

    Mock::given(method("POST"))
        .and(path(endpoints::LOGIN))
        .and(body_json(json!({
            "email": "doc@example.com",
            "password": "secret",
            "role": "doctor"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockApiResponses::login_response(&user, "acc", "ref"))
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = auth.login("doc@example.com", "secret", Some("doctor")).await;

    assert!(response.is_success());
    assert_eq!(response.data().unwrap()["access"], "acc");
    assert_eq!(store.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(), Some("acc"));
    assert_eq!(store.get(keys::REFRESH_TOKEN).await.unwrap().as_deref(), Some("ref"));
    assert_eq!(store.get(keys::ROLE).await.unwrap().as_deref(), Some("doctor"));
    assert_eq!(store.get(keys::EMAIL).await.unwrap().as_deref(), Some("doc@example.com"));
    assert!(auth.is_authenticated().await);
    assert_eq!(auth.user_role().await.as_deref(), Some("doctor"));
    assert_eq!(auth.current_user().await.unwrap().email.as_deref(), Some("doc@example.com"));
}

#[tokio::test]
async fn test_login_defaults_to_patient_role() {
    let mock_server = MockServer::start().await;
    let auth = AuthApi::new(test_client(&mock_server.uri(), TestSession::empty()));

    Mock::given(method("POST"))
        .and(path(endpoints::LOGIN))
        .and(body_json(json!({"email": "p@example.com", "password": "pw", "role": "patient"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "a", "refresh": "r"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(auth.login("p@example.com", "pw", None).await.is_success());
}

#[tokio::test]
async fn test_invalid_credentials_do_not_trigger_refresh() {
    let mock_server = MockServer::start().await;
    let auth = AuthApi::new(test_client(&mock_server.uri(), TestSession::empty()));

    Mock::given(method("POST"))
        .and(path(endpoints::LOGIN))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"non_field_errors": ["Invalid credentials"]}))
        )
        .mount(&mock_server)
        .await;
    Mock::given(path(endpoints::TOKEN_REFRESH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = auth.login("p@example.com", "wrong", None).await;

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("Invalid credentials"));
    assert_eq!(response.status(), Some(401));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_without_session() {
    let mock_server = MockServer::start().await;
    let auth = AuthApi::new(test_client(&mock_server.uri(), TestSession::empty()));

    let response = auth.logout().await;

    assert!(response.is_success());
    assert_eq!(response.message(), Some("No active session."));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("p@example.com");
    let store = TestSession::logged_in(&user, "acc", "ref");
    let auth = AuthApi::new(test_client(&mock_server.uri(), store.clone()));

    Mock::given(method("POST"))
        .and(path(endpoints::LOGOUT))
        .and(header("Authorization", "Bearer acc"))
        .and(body_json(json!({"refresh": "ref"})))
        .respond_with(ResponseTemplate::new(205))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = auth.logout().await;

    assert!(response.is_success());
    for key in keys::ALL {
        assert_eq!(store.get(key).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_logout_with_rejected_token_still_succeeds() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("p@example.com");
    let store = TestSession::logged_in(&user, "acc", "ref");
    let auth = AuthApi::new(test_client(&mock_server.uri(), store.clone()));

    Mock::given(method("POST"))
        .and(path(endpoints::LOGOUT))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(MockApiResponses::detail_error("Token is blacklisted"))
        )
        .mount(&mock_server)
        .await;

    let response = auth.logout().await;

    assert!(response.is_success());
    assert_eq!(response.message(), Some("Session already ended."));
    assert_eq!(store.get(keys::ACCESS_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_server_error_is_reported() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("p@example.com");
    let store = TestSession::logged_in(&user, "acc", "ref");
    let auth = AuthApi::new(test_client(&mock_server.uri(), store.clone()));

    Mock::given(method("POST"))
        .and(path(endpoints::LOGOUT))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Database down"})))
        .mount(&mock_server)
        .await;

    let response = auth.logout().await;

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("Database down"));
    assert_eq!(store.get(keys::REFRESH_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_change_password_surfaces_validation_error() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("p@example.com");
    let auth = AuthApi::new(test_client(
        &mock_server.uri(),
        TestSession::logged_in(&user, "acc", "ref"),
    ));

    Mock::given(method("POST"))
        .and(path(endpoints::CHANGE_PASSWORD))
        .and(body_json(json!({"old_password": "old", "new_password": "short"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(MockApiResponses::validation_error(
                "new_password",
                "This password is too short.",
            ))
        )
        .mount(&mock_server)
        .await;

    let response = auth.change_password("old", "short").await;

    assert_eq!(response.error(), Some("new_password: This password is too short."));
    assert_eq!(
        response.details(),
        Some(&json!({"new_password": ["This password is too short."]}))
    );
}
