use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

use crate::query::build_query_string;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized to JSON text before sending.
    Json(Value),
    /// Sent unchanged, e.g. file uploads or pre-encoded multipart payloads.
    Raw(Vec<u8>),
}

/// Description of one backend call before it is executed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
    /// Overrides for the default headers, applied last.
    pub headers: HeaderMap,
    pub skip_auth_refresh: bool,
    pub attach_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
            skip_auth_refresh: false,
            attach_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn raw(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Appends `?a=1&b=2` built from a JSON object of parameters, or
    /// `&a=1&b=2` when the path already carries a query string.
    pub fn query(mut self, params: &Value) -> Self {
        let query = build_query_string(params);
        match query.strip_prefix('?') {
            Some(pairs) if self.path.contains('?') => {
                self.path.push('&');
                self.path.push_str(pairs);
            }
            _ => self.path.push_str(&query),
        }
        self
    }

    /// The request must not trigger another token refresh on 401.
    pub fn skip_auth_refresh(mut self) -> Self {
        self.skip_auth_refresh = true;
        self
    }

    /// Send without the stored bearer token.
    pub fn without_auth(mut self) -> Self {
        self.attach_auth = false;
        self
    }
}
