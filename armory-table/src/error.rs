//! Error types for table operations.

use armory_settings::SettingsError;
use thiserror::Error;

use crate::column::ColumnId;

/// Errors returned by [`ItemTable`](crate::ItemTable) operations.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),
    #[error("duplicate column id: {0}")]
    DuplicateColumn(ColumnId),
    #[error("{0} is already in progress")]
    ActionPending(&'static str),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Failure reported by the item store for a single item.
///
/// The message is shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
