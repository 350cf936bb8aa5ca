//! Render-ready projection of the table state.
//!
//! A [`TableView`] is plain data: any UI layer can draw it without
//! touching [`ItemTable`](crate::ItemTable) internals.

use crate::column::{ColumnDefinition, ColumnId, GridWidth};
use crate::item::TableItem;
use crate::row::Row;
use crate::selection::{Selection, SelectionState};
use crate::sort::{ColumnSort, SortDirection};
use crate::value::CellValue;

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    /// State of the select-all checkbox.
    pub select_all: SelectionState,
    /// Selected rows among the visible ones.
    pub selected_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub id: ColumnId,
    pub label: String,
    pub sortable: bool,
    /// Active direction, if this column is in the sort list.
    pub sort: Option<SortDirection>,
    /// 1-based position in the sort list.
    pub sort_priority: Option<usize>,
    pub width: GridWidth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub checked: bool,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub column: ColumnId,
    pub text: String,
    /// Shift-clicking this cell narrows the search query.
    pub filterable: bool,
}

pub(crate) fn project<'a, I: TableItem>(
    columns: &[&ColumnDefinition<I>],
    sorts: &[ColumnSort],
    rows: impl Iterator<Item = &'a Row<I>>,
    selection: &Selection,
) -> TableView {
    let headers = columns
        .iter()
        .map(|column| {
            let position = sorts.iter().position(|s| s.column_id == column.id);
            HeaderView {
                id: column.id.clone(),
                label: column.header.clone(),
                sortable: column.sortable,
                sort: position.map(|p| sorts[p].direction),
                sort_priority: position.map(|p| p + 1),
                width: column.grid_width,
            }
        })
        .collect();

    let rows: Vec<RowView> = rows
        .map(|row| RowView {
            id: row.id().to_string(),
            checked: selection.is_selected(row.id()),
            cells: columns
                .iter()
                .map(|column| {
                    let value = row.value(column.id.as_str()).cloned().unwrap_or(CellValue::Empty);
                    CellView {
                        column: column.id.clone(),
                        text: column.render_cell(&value, &row.item),
                        filterable: column.is_filterable(),
                    }
                })
                .collect(),
        })
        .collect();

    let visible: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    let select_all = selection.state(&visible);
    let selected_count = rows.iter().filter(|r| r.checked).count();

    TableView {
        headers,
        rows,
        select_all,
        selected_count,
    }
}
