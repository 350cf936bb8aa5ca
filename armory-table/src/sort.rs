//! Multi-column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnDefinition, ColumnId};
use crate::item::TableItem;
use crate::row::Row;
use crate::value::CellValue;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One entry of the sort list. Earlier entries take priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column_id: ColumnId,
    pub direction: SortDirection,
}

impl ColumnSort {
    pub fn new(column_id: impl Into<ColumnId>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn ascending(column_id: impl Into<ColumnId>) -> Self {
        Self::new(column_id, SortDirection::Ascending)
    }

    pub fn descending(column_id: impl Into<ColumnId>) -> Self {
        Self::new(column_id, SortDirection::Descending)
    }
}

/// Compute the sort list after a header click.
///
/// Without `additive`, the clicked column becomes the only sort key; its
/// direction flips if it was already in the list, otherwise it starts at
/// `default_direction`. With `additive`, the existing list is kept and the
/// clicked column either flips in place or is appended.
pub fn toggle_sort(
    sorts: &[ColumnSort],
    column_id: &ColumnId,
    default_direction: SortDirection,
    additive: bool,
) -> Vec<ColumnSort> {
    let existing = sorts.iter().position(|s| &s.column_id == column_id);

    if !additive {
        let direction = match existing {
            Some(index) => sorts[index].direction.reversed(),
            None => default_direction,
        };
        return vec![ColumnSort::new(column_id.clone(), direction)];
    }

    let mut next = sorts.to_vec();
    match existing {
        Some(index) => next[index].direction = next[index].direction.reversed(),
        None => next.push(ColumnSort::new(column_id.clone(), default_direction)),
    }
    next
}

/// A sort entry resolved against its column definition.
struct SortKey<'a, I> {
    column: &'a ColumnDefinition<I>,
    direction: SortDirection,
}

/// Resolve sort entries against the enabled columns.
///
/// Entries naming a column that is disabled or unsortable are skipped.
fn resolve_keys<'a, I>(
    sorts: &[ColumnSort],
    columns: &[&'a ColumnDefinition<I>],
) -> Vec<SortKey<'a, I>> {
    sorts
        .iter()
        .filter_map(|sort| {
            columns
                .iter()
                .find(|c| c.id == sort.column_id && c.sortable)
                .map(|column| SortKey {
                    column,
                    direction: sort.direction,
                })
        })
        .collect()
}

/// Composite comparison: first key decides, later keys break ties.
fn compare_rows<I: TableItem>(a: &Row<I>, b: &Row<I>, keys: &[SortKey<'_, I>]) -> Ordering {
    static EMPTY: CellValue = CellValue::Empty;

    for key in keys {
        let id = key.column.id.as_str();
        let left = a.value(id).unwrap_or(&EMPTY);
        let right = b.value(id).unwrap_or(&EMPTY);
        let ordering = key.direction.apply(key.column.compare(left, right));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable ordering of `rows` by the sort list.
///
/// Returns indices into `rows`. Rows that tie on every key keep their
/// input order, so sorting always starts from the item order rather than
/// from a previous sort.
pub fn sort_order<I: TableItem>(
    rows: &[Row<I>],
    sorts: &[ColumnSort],
    columns: &[&ColumnDefinition<I>],
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let keys = resolve_keys(sorts, columns);
    if !keys.is_empty() {
        order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], &keys));
    }
    order
}
