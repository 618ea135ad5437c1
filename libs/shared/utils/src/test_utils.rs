use std::sync::Arc;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use shared_config::ClientConfig;
use shared_http::session::keys;
use shared_http::{HealHubClient, InMemorySessionStore};
use shared_models::User;

pub struct TestConfig {
    pub api_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "doctor")
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn owner(email: &str) -> Self {
        Self::new(email, "owner")
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "role": self.role,
            "full_name": "Test User"
        })
    }

    pub fn to_user(&self) -> User {
        User {
            id: Some(json!(self.id)),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            full_name: Some("Test User".to_string()),
            extra: Default::default(),
        }
    }
}

/// Session store fixtures.
pub struct TestSession;

impl TestSession {
    pub fn empty() -> Arc<InMemorySessionStore> {
        Arc::new(InMemorySessionStore::new())
    }

    pub fn logged_in(user: &TestUser, access: &str, refresh: &str) -> Arc<InMemorySessionStore> {
        Arc::new(InMemorySessionStore::with_entries([
            (keys::ACCESS_TOKEN, access.to_string()),
            (keys::REFRESH_TOKEN, refresh.to_string()),
            (keys::USER, user.to_json().to_string()),
            (keys::ROLE, user.role.clone()),
            (keys::EMAIL, user.email.clone()),
        ]))
    }
}

pub fn test_client(api_base_url: &str, store: Arc<InMemorySessionStore>) -> Arc<HealHubClient> {
    Arc::new(HealHubClient::new(
        TestConfig::with_base_url(api_base_url).to_client_config(),
        store,
    ))
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn login_response(user: &TestUser, access: &str, refresh: &str) -> Value {
        json!({
            "access": access,
            "refresh": refresh,
            "user": user.to_json()
        })
    }

    pub fn refresh_response(access: &str, refresh: Option<&str>) -> Value {
        match refresh {
            Some(refresh) => json!({"access": access, "refresh": refresh}),
            None => json!({"access": access}),
        }
    }

    pub fn doctor_response(id: u64) -> Value {
        json!({
            "id": id,
            "user": {"email": "doctor@example.com", "full_name": "Dr. Test"},
            "specialization": "Cardiology",
            "department": "Cardiology",
            "license_number": "MD123456",
            "experience_years": 10,
            "is_available": true
        })
    }

    pub fn patient_response(id: u64) -> Value {
        json!({
            "id": id,
            "user": {"email": "patient@example.com", "full_name": "Pat Test"},
            "date_of_birth": "1990-01-01",
            "blood_group": "O+",
            "phone": "+353000000"
        })
    }

    pub fn appointment_response(id: u64, doctor_id: u64) -> Value {
        json!({
            "id": id,
            "doctor": doctor_id,
            "appointment_date": "2025-03-14",
            "appointment_time": "10:30:00",
            "status": "scheduled",
            "reason": "Checkup"
        })
    }

    pub fn validation_error(field: &str, message: &str) -> Value {
        let mut body = Map::new();
        body.insert(field.to_string(), json!([message]));
        Value::Object(body)
    }

    pub fn detail_error(message: &str) -> Value {
        json!({ "detail": message })
    }
}
