//! Enabled-column list updates.

use std::collections::HashSet;

use crate::column::ColumnId;

/// New enabled-column list after toggling one column on or off.
///
/// Walks `known` in registry order and keeps a column if it is the toggled
/// column and `checked` is set, or if it is any other column that was
/// already enabled. Ids in `enabled` that are not known are dropped, and
/// the result never contains duplicates.
pub fn toggle_enabled_column(
    known: &[ColumnId],
    enabled: &[ColumnId],
    toggled: &ColumnId,
    checked: bool,
) -> Vec<ColumnId> {
    let enabled: HashSet<&ColumnId> = enabled.iter().collect();
    let mut seen = HashSet::new();

    known
        .iter()
        .filter(|id| {
            if *id == toggled {
                checked
            } else {
                enabled.contains(id)
            }
        })
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
