//! Weight-string normalization.
//!
//! Turns the free-text `weight` cell of a product row ("500g", "1.5 KG",
//! "250 ml", "1 pc") into kilograms. Unit tokens are plain substrings checked
//! in [`UnitToken::PRIORITY`] order; the first one present decides the
//! formula. Anything that cannot be read yields
//! [`NormalizedWeight::Unconvertible`] instead of an error.

use crate::models::{CellValue, NormalizedWeight, UnitToken};

/// Assumed mass of a single-piece item (e.g. a tender coconut). The piece
/// count itself is not parsed.
pub const PIECE_WEIGHT_KG: f64 = 1.2;

/// Density used to turn milliliters into grams (milk, g/ml).
pub const MILLILITER_DENSITY_G_PER_ML: f64 = 1.03;

const GRAMS_PER_KG: f64 = 1000.0;

/// Normalize one table cell. Only text cells are eligible; empty cells,
/// numbers and booleans are unconvertible.
pub fn normalize(cell: &CellValue) -> NormalizedWeight {
    match cell.as_text() {
        Some(raw) => convert_to_kg(raw),
        None => NormalizedWeight::Unconvertible,
    }
}

/// Normalize a raw weight string.
pub fn convert_to_kg(raw: &str) -> NormalizedWeight {
    let weight = raw.trim().to_lowercase();

    match detect_unit(&weight) {
        Some(UnitToken::PieceCount) => NormalizedWeight::Kilograms(PIECE_WEIGHT_KG),
        Some(unit) => match parse_magnitude(&weight, unit) {
            Some(value) => NormalizedWeight::Kilograms(to_kilograms(value, unit)),
            None => NormalizedWeight::Unconvertible,
        },
        None => NormalizedWeight::Unconvertible,
    }
}

/// First unit token present in an already lower-cased string.
pub fn detect_unit(weight: &str) -> Option<UnitToken> {
    UnitToken::PRIORITY
        .into_iter()
        .find(|unit| contains_token(weight, *unit))
}

// The "g" of "kg" belongs to the kilogram token, so the grams check only
// looks at a "g" that does not follow a "k".
fn contains_token(weight: &str, unit: UnitToken) -> bool {
    match unit {
        UnitToken::Grams => weight
            .match_indices('g')
            .any(|(idx, _)| !weight[..idx].ends_with('k')),
        other => weight.contains(other.token()),
    }
}

/// Remove every occurrence of the unit token and parse what is left.
/// Negative or non-finite magnitudes are rejected.
fn parse_magnitude(weight: &str, unit: UnitToken) -> Option<f64> {
    let remainder = weight.replace(unit.token(), "");
    let value: f64 = remainder.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        // "-0" passes the check above; report it as plain zero.
        Some(value.abs())
    } else {
        None
    }
}

fn to_kilograms(value: f64, unit: UnitToken) -> f64 {
    match unit {
        UnitToken::PieceCount => PIECE_WEIGHT_KG,
        UnitToken::Milliliters => value * MILLILITER_DENSITY_G_PER_ML / GRAMS_PER_KG,
        UnitToken::Grams => value / GRAMS_PER_KG,
        UnitToken::Kilograms => value,
    }
}
