use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the raw weight strings. Conversion requires it.
pub const WEIGHT_COLUMN: &str = "weight";

/// Column added (or replaced) with the normalized kilogram values.
pub const WEIGHT_KG_COLUMN: &str = "weight_kg";

/// Header row of the downloadable product template.
pub const TEMPLATE_COLUMNS: [&str; 9] = [
    "product_id",
    "product_name",
    "pack_size",
    "bb_order_qty",
    "is_Nonmilk",
    "length",
    "depth",
    "height",
    "weight",
];

/// Columns shown in the converted-data preview, when present.
pub const CONVERTED_PREVIEW_COLUMNS: [&str; 5] =
    ["product_id", "product_name", "pack_size", "weight", "weight_kg"];

/// Columns shown for sample unconvertible rows, when present.
pub const UNCONVERTIBLE_SAMPLE_COLUMNS: [&str; 3] = ["product_id", "product_name", "weight"];

/// A single cell read from an uploaded table.
///
/// CSV cells are always `Text` or `Empty`; spreadsheets can also carry
/// numbers and booleans. Only `Text` is a candidate for weight conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Unit markers recognized inside a weight string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitToken {
    PieceCount,
    Milliliters,
    Grams,
    Kilograms,
}

impl UnitToken {
    /// Match order. The first token found in the input wins.
    pub const PRIORITY: [UnitToken; 4] = [
        UnitToken::PieceCount,
        UnitToken::Milliliters,
        UnitToken::Grams,
        UnitToken::Kilograms,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            UnitToken::PieceCount => "pc",
            UnitToken::Milliliters => "ml",
            UnitToken::Grams => "g",
            UnitToken::Kilograms => "kg",
        }
    }
}

/// Result of normalizing one weight cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NormalizedWeight {
    /// Finite, non-negative mass in kilograms.
    Kilograms(f64),
    Unconvertible,
}

impl NormalizedWeight {
    pub fn as_kg(&self) -> Option<f64> {
        match self {
            NormalizedWeight::Kilograms(kg) => Some(*kg),
            NormalizedWeight::Unconvertible => None,
        }
    }

    pub fn is_unconvertible(&self) -> bool {
        matches!(self, NormalizedWeight::Unconvertible)
    }
}

impl From<NormalizedWeight> for CellValue {
    fn from(weight: NormalizedWeight) -> Self {
        match weight {
            NormalizedWeight::Kilograms(kg) => CellValue::Number(kg),
            NormalizedWeight::Unconvertible => CellValue::Empty,
        }
    }
}
