use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Anything else the backend sends with the user record is kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.full_name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }

        let first = self.extra.get("first_name").and_then(Value::as_str).unwrap_or("");
        let last = self.extra.get("last_name").and_then(Value::as_str).unwrap_or("");
        let joined = format!("{} {}", first, last).trim().to_string();

        if joined.is_empty() {
            self.email.clone()
        } else {
            Some(joined)
        }
    }

    pub fn normalized_role(&self) -> Option<String> {
        self.role
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(str::to_lowercase)
    }
}

/// Login response body: `{access, refresh, user}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 12,
            "email": "doc@healhub.test",
            "role": "Doctor",
            "first_name": "Ada",
            "last_name": "Byron",
            "department": "Cardiology"
        }))
        .unwrap();

        assert_eq!(user.id, Some(json!(12)));
        assert_eq!(user.normalized_role().as_deref(), Some("doctor"));
        assert_eq!(user.display_name().as_deref(), Some("Ada Byron"));
        assert_eq!(user.extra["department"], "Cardiology");

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["department"], "Cardiology");
        assert!(back.get("full_name").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = serde_json::from_value(json!({"email": "p@healhub.test"})).unwrap();
        assert_eq!(user.display_name().as_deref(), Some("p@healhub.test"));
        assert_eq!(user.normalized_role(), None);
    }

    #[test]
    fn test_auth_data_tolerates_missing_fields() {
        let data: AuthData = serde_json::from_value(json!({"access": "a"})).unwrap();
        assert_eq!(data.access.as_deref(), Some("a"));
        assert!(data.refresh.is_none());
        assert!(data.user.is_none());
    }
}
