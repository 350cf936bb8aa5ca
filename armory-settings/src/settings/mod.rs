//! Typed, scoped preference storage.

mod backend;
mod memory;
mod sqlite;

pub use backend::PreferenceBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("cannot prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Typed view over a [`PreferenceBackend`], optionally scoped to a key
/// prefix.
///
/// Scopes nest with `.`: `prefs.scoped("columns").scoped("enabled")` reads
/// and writes keys under `columns.enabled.`. Clones share the backend.
///
/// # Example
///
/// ```ignore
/// let prefs = Preferences::new(SqliteBackend::open_default().await?);
/// let columns = prefs.scoped("columns.enabled");
/// columns.set("armor", &vec!["name", "power"]).await?;
/// ```
#[derive(Clone)]
pub struct Preferences {
    backend: Arc<dyn PreferenceBackend>,
    scope: String,
}

impl Preferences {
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            scope: String::new(),
        }
    }

    /// Preferences over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Preferences limited to keys under `name`.
    pub fn scoped(&self, name: &str) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            scope: self.key(name),
        }
    }

    /// Key prefix of this scope, empty at the root.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Full backend key for `name` in this scope.
    pub fn key(&self, name: &str) -> String {
        if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.scope, name)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.load(&self.key(name)).await? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(SettingsError::Deserialization)
    }

    pub async fn get_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T, SettingsError> {
        Ok(self.get(name).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync + ?Sized>(&self, name: &str, value: &T) -> Result<(), SettingsError> {
        let key = self.key(name);
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        log::debug!("[settings] writing {} ({} bytes)", key, bytes.len());
        self.backend.store(&key, bytes).await
    }

    pub async fn remove(&self, name: &str) -> Result<(), SettingsError> {
        self.backend.remove(&self.key(name)).await
    }

    /// Names stored in this scope, relative to it and sorted.
    pub async fn names(&self) -> Result<Vec<String>, SettingsError> {
        let prefix = if self.scope.is_empty() {
            String::new()
        } else {
            format!("{}.", self.scope)
        };
        let keys = self.backend.keys(&prefix).await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }
}
