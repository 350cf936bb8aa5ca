//! The item table state object.

use std::collections::HashSet;
use std::sync::Arc;

use crate::actions::{self, ActionTracker, LockOutcome};
use crate::collaborators::{ColumnSettings, ItemStore, Notifier, SearchQuery};
use crate::column::{ColumnDefinition, ColumnId};
use crate::error::TableError;
use crate::item::{ItemCategory, Modifiers, TableItem};
use crate::row::{Row, build_rows};
use crate::selection::{Selection, SelectionState};
use crate::sort::{ColumnSort, sort_order, toggle_sort};
use crate::value::CellValue;
use crate::view::{self, TableView};
use crate::visibility::toggle_enabled_column;

/// Construction options for an [`ItemTable`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub category: ItemCategory,
    /// Initial sort list. When empty, the first enabled sortable column is
    /// used with its default direction.
    pub initial_sort: Vec<ColumnSort>,
    /// Initially enabled columns. `None` enables every column.
    pub enabled_columns: Option<Vec<ColumnId>>,
}

impl TableConfig {
    pub fn new(category: ItemCategory) -> Self {
        Self {
            category,
            initial_sort: Vec::new(),
            enabled_columns: None,
        }
    }

    pub fn sort(mut self, sorts: Vec<ColumnSort>) -> Self {
        self.initial_sort = sorts;
        self
    }

    pub fn enabled_columns(mut self, columns: Vec<ColumnId>) -> Self {
        self.enabled_columns = Some(columns);
        self
    }
}

/// Everything the table dispatches to.
pub struct Collaborators<I: TableItem> {
    pub store: Arc<dyn ItemStore<I>>,
    pub notifier: Arc<dyn Notifier>,
    pub search: Arc<dyn SearchQuery>,
    pub settings: Arc<dyn ColumnSettings>,
}

impl<I: TableItem> Clone for Collaborators<I> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            search: Arc::clone(&self.search),
            settings: Arc::clone(&self.settings),
        }
    }
}

/// Sortable, multi-select table over a list of items.
///
/// Rows are rebuilt only when the items or the enabled columns change, and
/// re-ordered only when those or the sort list change. All other
/// operations read the cached rows.
pub struct ItemTable<I: TableItem> {
    category: ItemCategory,
    /// Every known column, in registry order.
    columns: Vec<ColumnDefinition<I>>,
    enabled: Vec<ColumnId>,
    items: Vec<Arc<I>>,
    /// Rows in item order.
    built: Vec<Row<I>>,
    /// Indices into `built`, in display order.
    order: Vec<usize>,
    sorts: Vec<ColumnSort>,
    selection: Selection,
    lock_tracker: ActionTracker,
    collaborators: Collaborators<I>,
}

/// Enabled column definitions in registry order.
fn enabled_definitions<'a, I>(
    columns: &'a [ColumnDefinition<I>],
    enabled: &[ColumnId],
) -> Vec<&'a ColumnDefinition<I>> {
    columns.iter().filter(|c| enabled.contains(&c.id)).collect()
}

impl<I: TableItem> ItemTable<I> {
    /// Create a table over `items`.
    ///
    /// Fails if two columns share an id.
    pub fn new(
        columns: Vec<ColumnDefinition<I>>,
        items: Vec<Arc<I>>,
        config: TableConfig,
        collaborators: Collaborators<I>,
    ) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(&column.id) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }

        let known: Vec<ColumnId> = columns.iter().map(|c| c.id.clone()).collect();
        let enabled = match config.enabled_columns {
            Some(ids) => known.iter().filter(|id| ids.contains(id)).cloned().collect(),
            None => known,
        };

        let sorts = if config.initial_sort.is_empty() {
            enabled_definitions(&columns, &enabled)
                .into_iter()
                .find(|c| c.sortable)
                .map(|c| vec![ColumnSort::new(c.id.clone(), c.default_sort)])
                .unwrap_or_default()
        } else {
            config.initial_sort
        };

        let mut table = Self {
            category: config.category,
            columns,
            enabled,
            items,
            built: Vec::new(),
            order: Vec::new(),
            sorts,
            selection: Selection::new(),
            lock_tracker: ActionTracker::new(),
            collaborators,
        };
        table.rebuild_rows();
        Ok(table)
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    fn rebuild_rows(&mut self) {
        let columns = enabled_definitions(&self.columns, &self.enabled);
        self.built = build_rows(&self.items, &columns);
        self.order = sort_order(&self.built, &self.sorts, &columns);
    }

    fn reorder(&mut self) {
        let columns = enabled_definitions(&self.columns, &self.enabled);
        self.order = sort_order(&self.built, &self.sorts, &columns);
    }

    fn column(&self, id: &ColumnId) -> Result<&ColumnDefinition<I>, TableError> {
        self.columns
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| TableError::UnknownColumn(id.clone()))
    }

    fn visible_ids(&self) -> Vec<&str> {
        self.rows().map(|row| row.id()).collect()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn items(&self) -> &[Arc<I>] {
        &self.items
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &Row<I>> {
        self.order.iter().map(|&i| &self.built[i])
    }

    pub fn row_count(&self) -> usize {
        self.built.len()
    }

    /// Enabled column definitions, in registry order.
    pub fn columns(&self) -> Vec<&ColumnDefinition<I>> {
        enabled_definitions(&self.columns, &self.enabled)
    }

    /// Every known column id, in registry order.
    pub fn known_columns(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn enabled_columns(&self) -> &[ColumnId] {
        &self.enabled
    }

    pub fn sorts(&self) -> &[ColumnSort] {
        &self.sorts
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(&self.visible_ids())
    }

    /// Selected items, resolved against the current item list.
    ///
    /// Ids that no longer match an item are skipped.
    pub fn selected_items(&self) -> Vec<Arc<I>> {
        self.items
            .iter()
            .filter(|item| self.selection.is_selected(item.id()))
            .cloned()
            .collect()
    }

    /// Render-ready snapshot of the current state.
    pub fn view(&self) -> TableView {
        view::project(&self.columns(), &self.sorts, self.rows(), &self.selection)
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the item list.
    ///
    /// The selection is kept; ids of items that are gone stay selected but
    /// are ignored by bulk actions.
    pub fn set_items(&mut self, items: Vec<Arc<I>>) {
        self.items = items;
        self.rebuild_rows();
    }

    /// Replace the enabled columns without persisting them.
    ///
    /// Unknown ids are dropped; columns keep registry order.
    pub fn set_enabled_columns(&mut self, ids: &[ColumnId]) {
        self.enabled = self
            .columns
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| c.id.clone())
            .collect();
        self.rebuild_rows();
    }

    /// Load this category's persisted enabled columns, if any were saved.
    pub async fn restore_enabled_columns(&mut self) -> Result<(), TableError> {
        let stored = self
            .collaborators
            .settings
            .enabled_columns(self.category)
            .await?;
        if let Some(ids) = stored {
            log::debug!("[table] restoring {} enabled {} columns", ids.len(), self.category);
            self.set_enabled_columns(&ids);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Replace the sort list.
    pub fn set_sorts(&mut self, sorts: Vec<ColumnSort>) {
        self.sorts = sorts;
        self.reorder();
    }

    /// Handle a click on a column header.
    ///
    /// Without shift the column becomes the only sort key; with shift it is
    /// added to (or flipped within) the current list. Clicks on unsortable
    /// columns leave the sort list unchanged.
    pub fn click_header(&mut self, column_id: &ColumnId, modifiers: Modifiers) -> Result<&[ColumnSort], TableError> {
        let column = self.column(column_id)?;
        if !column.sortable {
            return Ok(&self.sorts);
        }

        let next = toggle_sort(&self.sorts, column_id, column.default_sort, modifiers.is_extending());
        log::debug!("[table] sort {:?} -> {:?}", self.sorts, next);
        self.set_sorts(next);
        Ok(&self.sorts)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Handle a row checkbox change to `checked`.
    ///
    /// With shift and an existing anchor, every row between the anchor and
    /// this row (in display order) is checked or unchecked together. The
    /// row becomes the new anchor either way.
    pub fn toggle_row(&mut self, item_id: &str, checked: bool, modifiers: Modifiers) -> SelectionState {
        if modifiers.is_extending() && self.selection.anchor().is_some() {
            let visible: Vec<&str> = self.order.iter().map(|&i| self.built[i].id()).collect();
            self.selection.range_toggle(item_id, checked, &visible);
        } else {
            self.selection.toggle(item_id, checked);
        }
        self.selection_state()
    }

    /// Handle a click on the select-all checkbox.
    pub fn toggle_select_all(&mut self) -> SelectionState {
        let visible: Vec<&str> = self.order.iter().map(|&i| self.built[i].id()).collect();
        let (added, removed) = self.selection.toggle_all(&visible);
        log::debug!("[selection] select-all: +{} -{}", added.len(), removed.len());
        self.selection_state()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    /// Show or hide a column and persist the new list for this category.
    ///
    /// The local column set changes even if persisting fails.
    pub async fn toggle_column(&mut self, column_id: &ColumnId, checked: bool) -> Result<(), TableError> {
        self.column(column_id)?;

        let next = toggle_enabled_column(&self.known_columns(), &self.enabled, column_id, checked);
        log::debug!(
            "[table] column {} {} ({} enabled)",
            column_id,
            if checked { "shown" } else { "hidden" },
            next.len()
        );
        self.set_enabled_columns(&next);
        self.collaborators
            .settings
            .set_enabled_columns(self.category, &self.enabled)
            .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cell interaction
    // -------------------------------------------------------------------------

    /// Handle a click on a cell.
    ///
    /// With shift held on a filterable column, the column's filter turns the
    /// cell value (or `secondary`, a value carried by the clicked element
    /// within the cell) into a query fragment, which is toggled in the
    /// search query. Returns the dispatched fragment.
    pub fn click_cell(
        &self,
        item_id: &str,
        column_id: &ColumnId,
        modifiers: Modifiers,
        secondary: Option<&str>,
    ) -> Option<String> {
        if !modifiers.is_extending() || !self.enabled.contains(column_id) {
            return None;
        }
        let column = self.column(column_id).ok()?;
        if !column.is_filterable() {
            return None;
        }
        let row = self.built.iter().find(|row| row.id() == item_id)?;

        let value = match secondary {
            Some(value) => CellValue::text(value),
            None => row.value(column_id.as_str()).cloned().unwrap_or_default(),
        };
        let fragment = column.query_fragment(&value, &row.item)?;
        log::debug!("[table] narrowing query with {}", fragment);
        self.collaborators.search.toggle_fragment(&fragment);
        Some(fragment)
    }

    // -------------------------------------------------------------------------
    // Bulk actions
    // -------------------------------------------------------------------------

    /// Lock or unlock every selected item, one after another.
    ///
    /// Only one lock batch runs at a time; a call made while another is in
    /// flight fails with [`TableError::ActionPending`] and sends nothing.
    /// A failing item stops the batch and is reported in the outcome (and to
    /// the notifier); items before it stay changed.
    pub async fn lock(&self, locked: bool) -> Result<LockOutcome, TableError> {
        let Some(_permit) = self.lock_tracker.try_begin() else {
            log::warn!("[actions] lock requested while a lock batch is running");
            return Err(TableError::ActionPending("lock"));
        };

        let items = self.selected_items();
        if items.is_empty() {
            return Ok(LockOutcome {
                applied: 0,
                error: None,
            });
        }
        Ok(actions::lock_items(
            self.collaborators.store.as_ref(),
            self.collaborators.notifier.as_ref(),
            &items,
            locked,
        )
        .await)
    }

    /// Whether a lock batch is in flight.
    pub fn is_locking(&self) -> bool {
        self.lock_tracker.is_pending()
    }

    /// Set the note on every selected item.
    ///
    /// Surrounding whitespace is trimmed and a note left empty clears it.
    ///
    /// Returns the number of items the request covered.
    pub fn set_note(&self, note: &str) -> usize {
        let items = self.selected_items();
        if items.is_empty() {
            return 0;
        }
        let note = Some(note.trim()).filter(|n| !n.is_empty());
        self.collaborators.store.set_note(&items, note);
        items.len()
    }

    /// Tag every selected item. Returns the number of items tagged.
    ///
    /// A blank tag dispatches nothing.
    pub fn tag(&self, tag: &str) -> usize {
        let items = self.selected_items();
        if items.is_empty() || tag.trim().is_empty() {
            return 0;
        }
        self.collaborators.store.tag(&items, tag);
        items.len()
    }

    /// Move every selected item into a loadout. Returns the number of items.
    pub fn move_to_loadout(&self, loadout_id: &str) -> usize {
        let items = self.selected_items();
        if items.is_empty() {
            return 0;
        }
        self.collaborators.store.move_to_loadout(&items, loadout_id);
        items.len()
    }
}
