//! Checkbox selection over the visible rows.
//!
//! Selection is tracked by item id so it survives re-sorting and item list
//! refreshes. Ids of rows that disappeared are kept until the selection is
//! cleared; callers resolve ids against the live item list before acting.

use std::collections::HashSet;

/// Tri-state summary of the selection relative to the visible rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No visible row is selected.
    #[default]
    None,
    /// Some, but not all, visible rows are selected.
    Partial,
    /// Every visible row is selected.
    All,
}

/// ID-based selection state with a range anchor.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
    /// Last explicitly toggled id, one endpoint of shift-range toggles.
    anchor: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// All selected ids, sorted for deterministic ordering.
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Clear all selection and the anchor.
    /// Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        let removed: Vec<_> = self.selected.drain().collect();
        self.anchor = None;
        removed
    }

    /// Check or uncheck a single id. The id becomes the anchor.
    /// Returns (added, removed) ids.
    pub fn toggle(&mut self, id: &str, checked: bool) -> (Vec<String>, Vec<String>) {
        self.anchor = Some(id.to_string());
        if checked {
            if self.selected.insert(id.to_string()) {
                return (vec![id.to_string()], vec![]);
            }
        } else if self.selected.remove(id) {
            return (vec![], vec![id.to_string()]);
        }
        (vec![], vec![])
    }

    /// Check or uncheck every id between the anchor and `target`, inclusive.
    ///
    /// The range is taken over `ordered_ids` (the current visible order),
    /// whichever endpoint comes first. Without an anchor, or when either
    /// endpoint is not visible, this is a single toggle of `target`. The
    /// target becomes the new anchor.
    ///
    /// Returns (added, removed) ids.
    pub fn range_toggle(
        &mut self,
        target: &str,
        checked: bool,
        ordered_ids: &[&str],
    ) -> (Vec<String>, Vec<String>) {
        let Some(anchor) = self.anchor.as_deref() else {
            return self.toggle(target, checked);
        };

        let anchor_pos = ordered_ids.iter().position(|id| *id == anchor);
        let target_pos = ordered_ids.iter().position(|id| *id == target);

        let (start, end) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) if a <= t => (a, t),
            (Some(a), Some(t)) => (t, a),
            _ => return self.toggle(target, checked),
        };

        let mut added = Vec::new();
        let mut removed = Vec::new();
        for id in &ordered_ids[start..=end] {
            if checked {
                if self.selected.insert((*id).to_string()) {
                    added.push((*id).to_string());
                }
            } else if self.selected.remove(*id) {
                removed.push((*id).to_string());
            }
        }

        log::debug!(
            "[selection] range {}..={} {}: +{} -{}",
            start,
            end,
            if checked { "checked" } else { "unchecked" },
            added.len(),
            removed.len()
        );
        self.anchor = Some(target.to_string());
        (added, removed)
    }

    /// Select-all checkbox behavior.
    ///
    /// An empty selection becomes every visible id; any other selection,
    /// partial or full, is cleared.
    /// Returns (added, removed) ids.
    pub fn toggle_all(&mut self, visible_ids: &[&str]) -> (Vec<String>, Vec<String>) {
        if self.selected.is_empty() {
            let added: Vec<String> = visible_ids
                .iter()
                .filter(|id| self.selected.insert((**id).to_string()))
                .map(|id| (*id).to_string())
                .collect();
            (added, vec![])
        } else {
            (vec![], self.clear())
        }
    }

    /// Tri-state of the select-all checkbox for the given visible rows.
    pub fn state(&self, visible_ids: &[&str]) -> SelectionState {
        let selected = visible_ids.iter().filter(|id| self.is_selected(id)).count();
        if selected == 0 {
            SelectionState::None
        } else if selected == visible_ids.len() {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }
}
