//! SQLite preference backend with a write-through read cache.

use std::path::Path;

use async_sqlite::rusqlite::{self, OptionalExtension};
use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;

use super::{PreferenceBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";

/// SQLite-backed preference storage.
///
/// Reads are served from a DashMap once a key has been seen; writes go to
/// the database first and only then replace the cached copy.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the preference database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        log::debug!("[settings] opening {}", path.as_ref().display());
        let client = ClientBuilder::new().path(path).open().await?;
        Self::with_client(client).await
    }

    /// Open the database at [`paths::settings_db`](crate::paths::settings_db),
    /// creating the data directory first.
    pub async fn open_default() -> Result<Self, SettingsError> {
        let dir = crate::paths::ensure_data_dir()?;
        Self::open(dir.join("settings.db")).await
    }

    /// Database that lives only as long as this backend.
    pub async fn in_memory() -> Result<Self, SettingsError> {
        let client = ClientBuilder::new().open().await?;
        Self::with_client(client).await
    }

    async fn with_client(client: Client) -> Result<Self, SettingsError> {
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl PreferenceBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(hit) = self.cache.get(key) {
            log::trace!("[settings] cache hit for {}", key);
            return Ok(Some(hit.value().clone()));
        }

        let lookup = key.to_string();
        let stored: Option<Vec<u8>> = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT value FROM preferences WHERE key = ?1",
                    [&lookup],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        if let Some(bytes) = &stored {
            self.cache.insert(key.to_string(), bytes.clone());
        }
        Ok(stored)
    }

    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let (owned_key, owned_value) = (key.to_string(), value.clone());
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![owned_key, owned_value],
                )
            })
            .await?;
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let owned_key = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM preferences WHERE key = ?1", [&owned_key]))
            .await?;
        self.cache.remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // Exact, case-sensitive prefix match
        let prefix = prefix.to_string();
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key FROM preferences WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
                )?;
                let rows = stmt.query_map([&prefix], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()
            })
            .await?;
        Ok(keys)
    }
}
