use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use shared_config::endpoints;
use shared_http::{ApiRequest, HealHubClient};
use shared_models::{ApiError, ApiResponse, AuthData, ChangePasswordRequest, LoginRequest, User};

pub const DEFAULT_LOGIN_ROLE: &str = "patient";

pub struct AuthApi {
    client: Arc<HealHubClient>,
}

impl AuthApi {
    pub fn new(client: Arc<HealHubClient>) -> Self {
        Self { client }
    }

    /// Logs in and persists the returned tokens and user record.
    ///
    /// Credentials are checked by the backend, so a 401 here is a plain
    /// failure and never triggers a token refresh.
    pub async fn login(&self, email: &str, password: &str, role: Option<&str>) -> ApiResponse {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.unwrap_or(DEFAULT_LOGIN_ROLE).to_string(),
        };
        debug!("Logging in {} as {}", request.email, request.role);

        let data = match self.client
            .execute(
                ApiRequest::post(endpoints::LOGIN)
                    .json(json!(request))
                    .skip_auth_refresh()
                    .without_auth(),
            )
            .await
        {
            Ok(data) => data,
            Err(e) => {
                error!("Login failed for {}: {}", email, e);
                return ApiResponse::failure(&e);
            }
        };

        if let Err(e) = self.save_login(data.as_ref()).await {
            error!("Failed to persist session: {}", e);
            return ApiResponse::failure(&e);
        }

        ApiResponse::success(data)
    }

    async fn save_login(&self, data: Option<&Value>) -> Result<(), ApiError> {
        let Some(data) = data else {
            return Ok(());
        };

        match serde_json::from_value::<AuthData>(data.clone()) {
            Ok(auth) => self.client.session().save_auth_data(&auth).await,
            Err(e) => {
                warn!("Login response has an unexpected shape: {}", e);
                Ok(())
            }
        }
    }

    /// Ends the session on the backend. Local session state is always cleared.
    pub async fn logout(&self) -> ApiResponse {
        let session = self.client.session();

        let Some(refresh) = session.refresh_token().await else {
            self.clear_session().await;
            return ApiResponse::success_with_message(None, "No active session.");
        };

        let result = self.client
            .execute(ApiRequest::post(endpoints::LOGOUT).json(json!({ "refresh": refresh })))
            .await;

        self.clear_session().await;

        match result {
            Ok(data) => ApiResponse::success(data),
            Err(e) if is_ended_session(&e) => {
                warn!("Logout request failed: {}", e);
                ApiResponse::success_with_message(None, "Session already ended.")
            }
            Err(e) => {
                warn!("Logout request failed: {}", e);
                ApiResponse::failure(&e)
            }
        }
    }

    async fn clear_session(&self) {
        if let Err(e) = self.client.session().clear().await {
            error!("Failed to clear session: {}", e);
        }
    }

    pub async fn get_profile(&self) -> ApiResponse {
        self.client.call(ApiRequest::get(endpoints::PROFILE)).await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResponse {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };

        self.client
            .call(ApiRequest::post(endpoints::CHANGE_PASSWORD).json(json!(request)))
            .await
    }

    pub async fn current_user(&self) -> Option<User> {
        self.client.session().current_user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated().await
    }

    pub async fn user_role(&self) -> Option<String> {
        self.client.session().user_role().await
    }
}

fn is_ended_session(error: &ApiError) -> bool {
    matches!(error, ApiError::Unauthorized) || matches!(error.status(), Some(400) | Some(401))
}
