//! Row records built from items and the enabled columns.

use std::collections::HashMap;
use std::sync::Arc;

use crate::column::{ColumnDefinition, ColumnId};
use crate::item::TableItem;
use crate::value::CellValue;

/// One item's computed values across the enabled columns.
#[derive(Debug)]
pub struct Row<I> {
    pub item: Arc<I>,
    values: HashMap<ColumnId, CellValue>,
}

impl<I: TableItem> Row<I> {
    pub fn id(&self) -> &str {
        self.item.id()
    }

    /// Computed value for a column, or `None` if the column was not enabled
    /// when the row was built.
    pub fn value(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn values(&self) -> &HashMap<ColumnId, CellValue> {
        &self.values
    }
}

impl<I> Clone for Row<I> {
    fn clone(&self) -> Self {
        Self {
            item: Arc::clone(&self.item),
            values: self.values.clone(),
        }
    }
}

/// Build one row per item by evaluating every column's extractor.
///
/// Pure function of its inputs; output order matches `items`.
pub fn build_rows<I: TableItem>(items: &[Arc<I>], columns: &[&ColumnDefinition<I>]) -> Vec<Row<I>> {
    log::trace!("[table] building {} rows over {} columns", items.len(), columns.len());
    items
        .iter()
        .map(|item| Row {
            item: Arc::clone(item),
            values: columns
                .iter()
                .map(|column| (column.id.clone(), column.value_of(item)))
                .collect(),
        })
        .collect()
}
