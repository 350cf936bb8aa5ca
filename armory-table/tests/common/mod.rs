//! Shared fixtures for item table tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use armory_settings::Preferences;
use armory_table::{
    ActionError, CellValue, Collaborators, ColumnDefinition, ItemCategory, ItemStore, ItemTable,
    Notification, Notifier, SearchQuery, SortDirection, TableConfig, TableItem,
};
use async_trait::async_trait;
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub struct Gear {
    pub id: String,
    pub name: String,
    pub power: i64,
    pub element: Option<String>,
    pub notes: Option<String>,
}

impl TableItem for Gear {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn gear(id: &str, name: &str, power: i64, element: Option<&str>) -> Arc<Gear> {
    Arc::new(Gear {
        id: id.to_string(),
        name: name.to_string(),
        power,
        element: element.map(str::to_string),
        notes: None,
    })
}

/// Five items with a power tie between `b` and `d`.
pub fn sample_items() -> Vec<Arc<Gear>> {
    vec![
        gear("a", "Ace of Spades", 1810, Some("Kinetic")),
        gear("b", "Bad Juju", 1800, Some("Kinetic")),
        gear("c", "Cerberus+1", 1790, Some("Void")),
        gear("d", "Dead Man's Tale", 1800, Some("Arc")),
        gear("e", "Eriana's Vow", 1820, None),
    ]
}

pub fn columns() -> Vec<ColumnDefinition<Gear>> {
    vec![
        ColumnDefinition::new("name", "Name", |g: &Gear| g.name.as_str().into()),
        ColumnDefinition::new("power", "Power", |g: &Gear| g.power.into())
            .default_sort(SortDirection::Descending)
            .filter(|value, _| value.as_int().map(|p| format!("power:>={}", p))),
        ColumnDefinition::new("element", "Element", |g: &Gear| g.element.clone().into())
            .render(|value, _| match value {
                CellValue::Empty => "-".to_string(),
                other => other.to_string(),
            })
            .filter(|value, _| value.as_text().map(|e| format!("is:{}", e.to_lowercase()))),
        ColumnDefinition::new("notes", "Notes", |g: &Gear| g.notes.clone().into()).no_sort(),
    ]
}

pub fn ids(table: &ItemTable<Gear>) -> Vec<String> {
    table.rows().map(|r| r.id().to_string()).collect()
}

// -----------------------------------------------------------------------------
// Collaborator fakes
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingStore {
    /// Every lock call issued, in order.
    pub lock_calls: Mutex<Vec<(String, bool)>>,
    /// Lock state after successful calls.
    pub locked: Mutex<HashMap<String, bool>>,
    /// Item id whose lock call fails.
    pub fail_on: Option<String>,
    /// Lock calls wait for this before doing anything.
    pub gate: Option<Arc<Notify>>,
    pub touches: AtomicUsize,
    pub notes: Mutex<Vec<(Vec<String>, Option<String>)>>,
    pub tags: Mutex<Vec<(Vec<String>, String)>>,
    pub moves: Mutex<Vec<(Vec<String>, String)>>,
}

impl RecordingStore {
    pub fn failing_on(id: &str) -> Self {
        Self {
            fail_on: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn touch_count(&self) -> usize {
        self.touches.load(Ordering::SeqCst)
    }

    pub fn lock_call_ids(&self) -> Vec<String> {
        self.lock_calls.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

fn item_ids(items: &[Arc<Gear>]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

#[async_trait]
impl ItemStore<Gear> for RecordingStore {
    async fn set_lock_state(&self, item: &Gear, locked: bool) -> Result<(), ActionError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.lock_calls.lock().unwrap().push((item.id.clone(), locked));
        if self.fail_on.as_deref() == Some(item.id.as_str()) {
            return Err(ActionError::new(format!("{} is in the postmaster", item.name)));
        }
        self.locked.lock().unwrap().insert(item.id.clone(), locked);
        Ok(())
    }

    fn touch(&self) {
        self.touches.fetch_add(1, Ordering::SeqCst);
    }

    fn set_note(&self, items: &[Arc<Gear>], note: Option<&str>) {
        self.notes
            .lock()
            .unwrap()
            .push((item_ids(items), note.map(str::to_string)));
    }

    fn tag(&self, items: &[Arc<Gear>], tag: &str) {
        self.tags.lock().unwrap().push((item_ids(items), tag.to_string()));
    }

    fn move_to_loadout(&self, items: &[Arc<Gear>], loadout_id: &str) {
        self.moves
            .lock()
            .unwrap()
            .push((item_ids(items), loadout_id.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingSearch {
    pub fragments: Mutex<Vec<String>>,
}

impl SearchQuery for RecordingSearch {
    fn toggle_fragment(&self, fragment: &str) {
        self.fragments.lock().unwrap().push(fragment.to_string());
    }
}

/// Collaborators plus handles to inspect them afterwards.
pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub search: Arc<RecordingSearch>,
    pub settings: Preferences,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(RecordingStore::default())
    }

    pub fn with_store(store: RecordingStore) -> Self {
        Self {
            store: Arc::new(store),
            notifier: Arc::new(RecordingNotifier::default()),
            search: Arc::new(RecordingSearch::default()),
            settings: Preferences::in_memory(),
        }
    }

    pub fn collaborators(&self) -> Collaborators<Gear> {
        Collaborators {
            store: self.store.clone(),
            notifier: self.notifier.clone(),
            search: self.search.clone(),
            settings: Arc::new(self.settings.clone()),
        }
    }

    pub fn table_with(&self, items: Vec<Arc<Gear>>, config: TableConfig) -> ItemTable<Gear> {
        ItemTable::new(columns(), items, config, self.collaborators()).unwrap()
    }

    /// Weapon table over the sample items, sorted by name ascending.
    pub fn table(&self) -> ItemTable<Gear> {
        self.table_with(
            sample_items(),
            TableConfig::new(ItemCategory::Weapon).sort(vec![armory_table::ColumnSort::ascending("name")]),
        )
    }
}
