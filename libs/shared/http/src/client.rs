use std::sync::Arc;

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use shared_config::{endpoints, ClientConfig};
use shared_models::{ApiError, ApiResponse, TokenPair};

use crate::error_message::extract_error_message;
use crate::request::{ApiRequest, RequestBody};
use crate::response::parse_response_body;
use crate::session::{Session, SessionStore};

const REQUEST_FAILED: &str = "Request failed";
const REFRESH_FAILED: &str = "Token refresh failed";

/// Where a single logical request is in its refresh-and-retry lifecycle.
///
/// `Retrying` only ever leads to `Done`, so a request is re-sent at most once.
enum Phase {
    Initial,
    Refreshing { rejected_token: Option<String> },
    Retrying,
    Done(Result<Response, ApiError>),
}

pub struct HealHubClient {
    client: Client,
    config: ClientConfig,
    session: Session,
    // Held while a refresh is in flight so concurrent 401s share one refresh.
    refresh_lock: Mutex<()>,
}

impl HealHubClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            config,
            session: Session::new(store),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.config.bypass_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Builds the outgoing request from the descriptor and the current session.
    /// Also returns the access token that was attached, if any.
    async fn build(&self, request: &ApiRequest) -> Result<(RequestBuilder, Option<String>), ApiError> {
        let url = self.config.full_url(&request.path);
        let mut headers = self.base_headers()?;

        let token = if request.attach_auth {
            self.session.access_token().await
        } else {
            None
        };

        if let Some(token) = &token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidHeader(format!("authorization: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        // Caller headers win on collision.
        headers.extend(request.headers.clone());

        let mut builder = self.client
            .request(request.method.clone(), &url)
            .headers(headers);

        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            Some(RequestBody::Raw(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };

        Ok((builder, token))
    }

    async fn dispatch(&self, builder: RequestBuilder, request: &ApiRequest) -> Result<Response, ApiError> {
        debug!("{} {}", request.method, request.path);

        builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", request.path, e);
            ApiError::Transport(e.to_string())
        })
    }

    /// Sends the request, refreshing the session and retrying once on 401.
    async fn send(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let mut phase = Phase::Initial;

        loop {
            phase = match phase {
                Phase::Initial => {
                    let (builder, token) = self.build(request).await?;
                    let response = self.dispatch(builder, request).await?;

                    if response.status() == StatusCode::UNAUTHORIZED && !request.skip_auth_refresh {
                        debug!("{} returned 401, refreshing session", request.path);
                        Phase::Refreshing { rejected_token: token }
                    } else {
                        Phase::Done(Ok(response))
                    }
                }
                Phase::Refreshing { rejected_token } => {
                    match self.refresh_after_rejection(rejected_token.as_deref()).await {
                        Ok(()) => Phase::Retrying,
                        Err(e) => {
                            warn!("Session refresh failed for {}: {}", request.path, e);
                            Phase::Done(Err(ApiError::Unauthorized))
                        }
                    }
                }
                Phase::Retrying => {
                    let (builder, _) = self.build(request).await?;
                    Phase::Done(self.dispatch(builder, request).await)
                }
                Phase::Done(result) => return result,
            };
        }
    }

    async fn refresh_after_rejection(&self, rejected_token: Option<&str>) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token().await {
            if rejected_token != Some(current.as_str()) {
                debug!("Access token was refreshed by a concurrent request");
                return Ok(());
            }
        }

        self.try_refresh().await.map(|_| ())
    }

    /// Runs a request and returns the parsed body of a 2xx response.
    pub async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let response = self.send(&request).await?;
        handle_http_response(response).await
    }

    /// Like [`execute`](Self::execute) but returns the raw body bytes.
    pub async fn download(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.send(&request).await?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Runs a request and folds the outcome into an [`ApiResponse`]. Never fails.
    pub async fn call(&self, request: ApiRequest) -> ApiResponse {
        match self.execute(request).await {
            Ok(data) => ApiResponse::success(data),
            Err(e) => {
                error!("API request error: {}", e);
                ApiResponse::failure(&e)
            }
        }
    }

    /// Exchanges the stored refresh token for a new access token.
    pub async fn refresh_token(&self) -> ApiResponse {
        match self.try_refresh().await {
            Ok(pair) => ApiResponse::success(Some(json!({
                "access": pair.access,
                "refresh": pair.refresh,
            }))),
            Err(e) => ApiResponse::failure(&e),
        }
    }

    /// Typed refresh. Any failure clears the whole session.
    pub async fn try_refresh(&self) -> Result<TokenPair, ApiError> {
        let result = match self.session.refresh_token().await {
            Some(refresh) => self.exchange_refresh_token(refresh).await,
            None => Err(ApiError::MissingRefreshToken),
        };

        if let Err(e) = &result {
            error!("Token refresh error: {}", e);
            if let Err(clear_err) = self.session.clear().await {
                error!("Failed to clear session after refresh failure: {}", clear_err);
            }
        }

        result
    }

    async fn exchange_refresh_token(&self, refresh: String) -> Result<TokenPair, ApiError> {
        let request = ApiRequest::post(endpoints::TOKEN_REFRESH)
            .json(json!({ "refresh": refresh }))
            .skip_auth_refresh()
            .without_auth();

        // Dispatched directly: the refresh call never enters the retry state machine.
        let (builder, _) = self.build(&request).await?;
        let response = self.dispatch(builder, &request).await?;
        let status = response.status();
        let data = parse_response_body(response).await;

        let access = non_empty_str(data.as_ref(), "access");
        let access = match access {
            Some(access) if status.is_success() => access,
            _ => {
                return Err(ApiError::RefreshFailed(
                    extract_error_message(data.as_ref(), REFRESH_FAILED)
                ))
            }
        };

        self.session.set_access_token(&access).await?;

        let refresh = match non_empty_str(data.as_ref(), "refresh") {
            Some(rotated) => {
                self.session.set_refresh_token(&rotated).await?;
                rotated
            }
            None => refresh,
        };

        debug!("Access token refreshed");
        Ok(TokenPair { access, refresh })
    }
}

fn non_empty_str(data: Option<&Value>, key: &str) -> Option<String> {
    data.and_then(|d| d.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

async fn http_error(response: Response) -> ApiError {
    let status = response.status();
    let fallback = status.canonical_reason().unwrap_or(REQUEST_FAILED);
    let payload = parse_response_body(response).await;

    ApiError::Http {
        message: extract_error_message(payload.as_ref(), fallback),
        status: status.as_u16(),
        payload,
    }
}

async fn handle_http_response(response: Response) -> Result<Option<Value>, ApiError> {
    if !response.status().is_success() {
        return Err(http_error(response).await);
    }
    Ok(parse_response_body(response).await)
}
