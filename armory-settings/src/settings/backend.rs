//! Byte-level preference storage.

use async_trait::async_trait;

use super::SettingsError;

/// Raw storage behind [`Preferences`](super::Preferences).
///
/// Keys are full dotted paths; scoping happens in `Preferences`.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or replace the value under `key`.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;

    /// Every stored key starting with `prefix`, sorted.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
