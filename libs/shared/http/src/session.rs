use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, warn};

use shared_models::{ApiError, AuthData, User};

/// Fixed storage keys for the persisted session.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER: &str = "user_data";
    pub const ROLE: &str = "userRole";
    pub const EMAIL: &str = "userEmail";

    pub const ALL: [&str; 5] = [ACCESS_TOKEN, REFRESH_TOKEN, USER, ROLE, EMAIL];
}

/// Persistent key-value storage backing the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;

    async fn remove(&self, key: &str) -> Result<(), ApiError>;

    /// Removes every session key.
    async fn clear(&self) -> Result<(), ApiError> {
        for key in keys::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
            ),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let mut entries = self.entries.write().await;
        for key in keys::ALL {
            entries.remove(key);
        }
        Ok(())
    }
}

/// Session persisted as a flat JSON object on disk, rewritten on every change.
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(ApiError::Storage(format!(
                    "failed to read {}: {}", path.display(), e
                )))
            }
        };

        debug!("Opened session file {} ({} entries)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), ApiError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| ApiError::Storage(format!(
                "failed to write {}: {}", self.path.display(), e
            )))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().await;
        for key in keys::ALL {
            entries.remove(key);
        }
        self.persist(&entries).await
    }
}

/// Typed view over a [`SessionStore`].
///
/// Read failures are logged and reported as "absent" so a broken store
/// behaves like a logged-out session.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                error!("Failed to read {} from session store: {}", key, e);
                None
            }
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.read(keys::ACCESS_TOKEN).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.read(keys::REFRESH_TOKEN).await
    }

    pub async fn set_access_token(&self, token: &str) -> Result<(), ApiError> {
        self.store.set(keys::ACCESS_TOKEN, token).await
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<(), ApiError> {
        self.store.set(keys::REFRESH_TOKEN, token).await
    }

    /// Persists whatever parts of a login response are present.
    pub async fn save_auth_data(&self, data: &AuthData) -> Result<(), ApiError> {
        if let Some(access) = data.access.as_deref().filter(|t| !t.is_empty()) {
            self.set_access_token(access).await?;
        }
        if let Some(refresh) = data.refresh.as_deref().filter(|t| !t.is_empty()) {
            self.set_refresh_token(refresh).await?;
        }
        if let Some(user) = &data.user {
            let serialized = serde_json::to_string(user)
                .map_err(|e| ApiError::Storage(e.to_string()))?;
            self.store.set(keys::USER, &serialized).await?;

            if let Some(role) = user.normalized_role() {
                self.store.set(keys::ROLE, &role).await?;
            }
            if let Some(email) = user.email.as_deref().filter(|e| !e.is_empty()) {
                self.store.set(keys::EMAIL, email).await?;
            }
        }
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ApiError> {
        self.store.clear().await
    }

    pub async fn current_user(&self) -> Option<User> {
        let stored = self.read(keys::USER).await?;
        match serde_json::from_str::<User>(&stored) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("Failed to parse stored user data: {}", e);
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Role from the stored user record, else the denormalised role key.
    pub async fn user_role(&self) -> Option<String> {
        if let Some(role) = self.current_user().await.and_then(|u| u.normalized_role()) {
            return Some(role);
        }
        self.read(keys::ROLE).await.map(|r| r.to_lowercase())
    }

    pub async fn user_email(&self) -> Option<String> {
        self.read(keys::EMAIL).await
    }
}
