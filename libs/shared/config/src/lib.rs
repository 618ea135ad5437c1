use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub mod endpoints;

pub const DEFAULT_BYPASS_HEADER: (&str, &str) = ("ngrok-skip-browser-warning", "true");
pub const DEFAULT_SESSION_FILE: &str = ".healhub_session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Extra headers sent on every request, e.g. a tunnel interstitial skip header.
    pub bypass_headers: Vec<(String, String)>,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            bypass_headers: vec![(
                DEFAULT_BYPASS_HEADER.0.to_string(),
                DEFAULT_BYPASS_HEADER.1.to_string(),
            )],
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Self {
        let api_base_url = env::var("HEALHUB_API_BASE_URL")
            .unwrap_or_else(|_| {
                warn!("HEALHUB_API_BASE_URL not set, using empty value");
                String::new()
            });

        let bypass_headers = match env::var("HEALHUB_BYPASS_HEADER") {
            Ok(raw) => parse_header_list(&raw),
            Err(_) => vec![(
                DEFAULT_BYPASS_HEADER.0.to_string(),
                DEFAULT_BYPASS_HEADER.1.to_string(),
            )],
        };

        let session_file = env::var("HEALHUB_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                warn!("HEALHUB_SESSION_FILE not set, using default");
                PathBuf::from(DEFAULT_SESSION_FILE)
            });

        let request_timeout = env::var("HEALHUB_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!("HEALHUB_REQUEST_TIMEOUT_SECS is not a number: {}", raw);
                    None
                }
            })
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let config = Self {
            api_base_url,
            bypass_headers,
            session_file,
            request_timeout,
        };

        if !config.is_configured() {
            warn!("Client not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }

    pub fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

/// Parses `name:value` pairs separated by commas. Malformed entries are skipped.
fn parse_header_list(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            match entry.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Some((name.trim().to_string(), value.trim().to_string()))
                }
                _ => {
                    warn!("Ignoring malformed bypass header entry: {}", entry);
                    None
                }
            }
        })
        .collect()
}
