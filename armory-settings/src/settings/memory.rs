//! In-memory preference backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{PreferenceBackend, SettingsError};

/// Preference storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PreferenceBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
