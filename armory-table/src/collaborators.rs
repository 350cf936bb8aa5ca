//! Interfaces to everything the table does not own.
//!
//! The table reads and writes item state, user notifications, the search
//! query and column preferences only through these traits. Implementations
//! are injected through [`Collaborators`](crate::Collaborators).

use std::sync::Arc;

use armory_settings::{Preferences, SettingsError};
use async_trait::async_trait;

use crate::column::ColumnId;
use crate::error::ActionError;
use crate::item::{ItemCategory, TableItem};

/// Item state changes requested by the toolbar.
#[async_trait]
pub trait ItemStore<I: TableItem>: Send + Sync {
    /// Lock or unlock one item. Awaited item by item during bulk locks.
    async fn set_lock_state(&self, item: &I, locked: bool) -> Result<(), ActionError>;

    /// Ask the store to refresh so the new lock states become visible.
    fn touch(&self);

    /// Set the note on every item. `None` clears it.
    fn set_note(&self, items: &[Arc<I>], note: Option<&str>);

    /// Apply a tag to every item.
    fn tag(&self, items: &[Arc<I>], tag: &str);

    /// Move every item into a loadout.
    fn move_to_loadout(&self, items: &[Arc<I>], loadout_id: &str);
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, body)
    }
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// The application's active search query.
pub trait SearchQuery: Send + Sync {
    /// Add the fragment to the query, or remove it if already present.
    fn toggle_fragment(&self, fragment: &str);
}

/// Persisted enabled-column preference, one list per item category.
#[async_trait]
pub trait ColumnSettings: Send + Sync {
    /// Stored list, or `None` if the user never changed it.
    async fn enabled_columns(&self, category: ItemCategory) -> Result<Option<Vec<ColumnId>>, SettingsError>;

    async fn set_enabled_columns(&self, category: ItemCategory, columns: &[ColumnId]) -> Result<(), SettingsError>;
}

/// Preference scope holding one enabled-column list per category, keyed
/// by [`ItemCategory::as_str`].
pub const ENABLED_COLUMNS_SCOPE: &str = "columns.enabled";

#[async_trait]
impl ColumnSettings for Preferences {
    async fn enabled_columns(&self, category: ItemCategory) -> Result<Option<Vec<ColumnId>>, SettingsError> {
        self.scoped(ENABLED_COLUMNS_SCOPE).get(category.as_str()).await
    }

    async fn set_enabled_columns(&self, category: ItemCategory, columns: &[ColumnId]) -> Result<(), SettingsError> {
        self.scoped(ENABLED_COLUMNS_SCOPE).set(category.as_str(), columns).await
    }
}
