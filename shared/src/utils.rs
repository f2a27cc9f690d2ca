// Formatting helpers shared by the report renderers.

/// Format with a fixed number of decimals, or "NaN" when the value is
/// undefined (e.g. the std of a single value).
pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.decimals$}", v, decimals = decimals),
        None => "NaN".to_string(),
    }
}

/// Shorten a cell for a fixed-width text column, marking the cut with '…'.
pub fn truncate_cell(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
