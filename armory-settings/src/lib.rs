//! Persisted user preferences for the armory item views.
//!
//! Preferences are bincode-encoded values behind a pluggable byte backend.
//! The SQLite backend is what the application keeps on disk, the memory
//! backend is for sessions that should not touch the filesystem.

pub mod paths;
mod settings;

pub use settings::{MemoryBackend, PreferenceBackend, Preferences, SettingsError, SqliteBackend};
