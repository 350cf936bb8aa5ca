//! Column definitions.
//!
//! A column is a named projection of an item into a [`CellValue`], with
//! optional custom ordering, cell rendering and query-narrowing filter.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sort::SortDirection;
use crate::value::CellValue;

/// Unique column identifier within a column set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Width hint for grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridWidth {
    /// Size to the widest cell.
    #[default]
    Auto,
    /// Fixed width in character cells.
    Chars(u16),
    /// Share of the remaining space.
    Fraction(u16),
}

pub type ValueFn<I> = Arc<dyn Fn(&I) -> CellValue + Send + Sync>;
pub type CompareFn = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;
pub type RenderFn<I> = Arc<dyn Fn(&CellValue, &I) -> String + Send + Sync>;
pub type FilterFn<I> = Arc<dyn Fn(&CellValue, &I) -> Option<String> + Send + Sync>;

/// Column configuration.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     ColumnDefinition::new("name", "Name", |gear: &Gear| gear.name.as_str().into()),
///     ColumnDefinition::new("power", "Power", |gear: &Gear| gear.power.into())
///         .default_sort(SortDirection::Descending)
///         .filter(|value, _| Some(format!("power:>={}", value))),
///     ColumnDefinition::new("notes", "Notes", |gear: &Gear| gear.notes.clone().into()).no_sort(),
/// ];
/// ```
pub struct ColumnDefinition<I> {
    pub id: ColumnId,
    pub header: String,
    value: ValueFn<I>,
    comparator: Option<CompareFn>,
    renderer: Option<RenderFn<I>>,
    filter: Option<FilterFn<I>>,
    pub default_sort: SortDirection,
    pub grid_width: GridWidth,
    pub sortable: bool,
}

impl<I> ColumnDefinition<I> {
    /// Create a sortable column with the given value extractor.
    ///
    /// Extractors must be total: they are called for every item whenever
    /// rows are rebuilt.
    pub fn new(
        id: impl Into<ColumnId>,
        header: impl Into<String>,
        value: impl Fn(&I) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            value: Arc::new(value),
            comparator: None,
            renderer: None,
            filter: None,
            default_sort: SortDirection::Ascending,
            grid_width: GridWidth::Auto,
            sortable: true,
        }
    }

    /// Replace the natural value ordering for this column.
    pub fn comparator(
        mut self,
        compare: impl Fn(&CellValue, &CellValue) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Custom cell text. Without one, cells show the value's `Display`.
    pub fn render(mut self, render: impl Fn(&CellValue, &I) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(render));
        self
    }

    /// Query fragment generator used for shift-click narrowing.
    ///
    /// Returning `None` means the value has nothing to narrow on.
    pub fn filter(
        mut self,
        filter: impl Fn(&CellValue, &I) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Direction used when this column first becomes a sort key.
    pub fn default_sort(mut self, direction: SortDirection) -> Self {
        self.default_sort = direction;
        self
    }

    pub fn width(mut self, width: GridWidth) -> Self {
        self.grid_width = width;
        self
    }

    /// Exclude this column from sorting. Header clicks on it are ignored.
    pub fn no_sort(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Evaluate the value extractor.
    pub fn value_of(&self, item: &I) -> CellValue {
        (self.value)(item)
    }

    /// Compare two values of this column in ascending order.
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match &self.comparator {
            Some(compare) => compare(a, b),
            None => a.natural_cmp(b),
        }
    }

    /// Cell text for a value.
    pub fn render_cell(&self, value: &CellValue, item: &I) -> String {
        match &self.renderer {
            Some(render) => render(value, item),
            None => value.to_string(),
        }
    }

    pub fn is_filterable(&self) -> bool {
        self.filter.is_some()
    }

    /// Query fragment for a value, if this column narrows queries.
    pub fn query_fragment(&self, value: &CellValue, item: &I) -> Option<String> {
        self.filter.as_ref().and_then(|filter| filter(value, item))
    }
}

impl<I> Clone for ColumnDefinition<I> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            value: Arc::clone(&self.value),
            comparator: self.comparator.clone(),
            renderer: self.renderer.clone(),
            filter: self.filter.clone(),
            default_sort: self.default_sort,
            grid_width: self.grid_width,
            sortable: self.sortable,
        }
    }
}

impl<I> fmt::Debug for ColumnDefinition<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("custom_comparator", &self.comparator.is_some())
            .field("custom_renderer", &self.renderer.is_some())
            .field("filterable", &self.filter.is_some())
            .field("default_sort", &self.default_sort)
            .field("grid_width", &self.grid_width)
            .field("sortable", &self.sortable)
            .finish()
    }
}
