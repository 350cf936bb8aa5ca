//! Cell values produced by column value extractors.

use std::cmp::Ordering;
use std::fmt;

/// A computed column value for one item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value (the column does not apply to this item).
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<CellValue>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Kind rank used when comparing values of different kinds.
    ///
    /// Numbers share a rank so ints and floats compare numerically.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::List(_) => 3,
            CellValue::Empty => 4,
        }
    }

    /// Natural ordering used when a column has no custom comparator.
    ///
    /// Total over all values: empty sorts after everything, numbers compare
    /// numerically, text compares case-insensitively with exact text as the
    /// tie-break, lists compare element-wise.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        use CellValue::{Bool, Float, Int, List, Text};

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Text(a), Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (List(a), List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.natural_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact comparison of an integer with a float, consistent with
/// `f64::total_cmp`.
///
/// Negative NaN sorts below every integer and positive NaN above. An
/// integer equal to zero sorts above `-0.0` and equal to `+0.0`.
fn cmp_int_float(a: i64, b: f64) -> Ordering {
    // 2^63, one past i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return if b.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if b >= BOUND {
        return Ordering::Less;
    }
    if b < -BOUND {
        return Ordering::Greater;
    }

    let floor = b.floor();
    // In range and integral, so the cast is exact
    match a.cmp(&(floor as i64)) {
        Ordering::Equal if b > floor => Ordering::Less,
        Ordering::Equal if b == 0.0 && b.is_sign_negative() => Ordering::Greater,
        ordering => ordering,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("Yes"),
            CellValue::Bool(false) => f.write_str("No"),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
            CellValue::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(values: Vec<T>) -> Self {
        CellValue::List(values.into_iter().map(Into::into).collect())
    }
}
