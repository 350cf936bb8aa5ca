//! Sortable, filterable, multi-select item table.
//!
//! [`ItemTable`] owns the table state (rows, column sorts, selection and
//! enabled columns) and exposes the user-facing operations: header clicks,
//! checkbox toggles, column visibility changes, cell query narrowing and the
//! bulk toolbar actions. Rendering is left to the caller through the pure
//! [`TableView`] projection.
//!
//! Everything the table talks to outside of its own state goes through the
//! collaborator traits in [`collaborators`], so the table can be driven
//! without an application shell.

pub mod actions;
pub mod collaborators;
pub mod column;
pub mod error;
pub mod item;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;
pub mod view;
pub mod visibility;

pub use actions::{ActionTracker, LockOutcome};
pub use collaborators::{ColumnSettings, ItemStore, Notification, NotificationKind, Notifier, SearchQuery};
pub use column::{ColumnDefinition, ColumnId, GridWidth};
pub use error::{ActionError, TableError};
pub use item::{ItemCategory, Modifiers, TableItem};
pub use row::Row;
pub use selection::{Selection, SelectionState};
pub use sort::{ColumnSort, SortDirection};
pub use table::{Collaborators, ItemTable, TableConfig};
pub use value::CellValue;
pub use view::{CellView, HeaderView, RowView, TableView};
