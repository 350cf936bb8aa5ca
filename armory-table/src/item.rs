//! Item identity and input modifiers.

use serde::{Deserialize, Serialize};

/// Anything that can be shown as a table row.
///
/// Items are opaque to the table apart from their id; every other attribute
/// is read through column value extractors.
pub trait TableItem: Send + Sync + 'static {
    /// Stable identifier, unique within one item list.
    fn id(&self) -> &str;
}

/// Item category a table is showing.
///
/// Each category keeps its own persisted list of enabled columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "weapon",
            ItemCategory::Armor => "armor",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier keys held during a click.
///
/// Shift is the extending modifier: it turns header clicks into multi-sort
/// edits, checkbox clicks into range toggles, and enables cell query
/// narrowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub fn is_extending(&self) -> bool {
        self.shift
    }
}
