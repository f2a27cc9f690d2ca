// Plain-text report for a ConvertFileResponse.
use shared::utils::{format_decimal, truncate_cell};

use crate::services::{ConvertFileResponse, ProtoWeightStatistics, TablePreview};

const MAX_CELL_WIDTH: usize = 24;

pub fn render_report(response: &ConvertFileResponse) -> String {
    let original_rows = response.original_preview.as_ref().map_or(0, |p| p.rows.len());

    let mut sections = vec![
        format!("Rows: {}\n", response.row_count),
        format!(
            "Original Data (First {} Rows)\n{}",
            original_rows,
            render_preview(response.original_preview.as_ref())
        ),
        format!(
            "Converted Data (with 'weight_kg' column)\n{}",
            render_preview(response.converted_preview.as_ref())
        ),
        format!(
            "Weight Statistics (in kg)\n{}",
            render_statistics(response.statistics.as_ref())
        ),
    ];
    if let Some(warning) = &response.warning {
        sections.push(format!(
            "{}\nHere are some examples of unconvertible entries:\n{}",
            warning,
            render_preview(response.unconvertible_sample.as_ref())
        ));
    }
    sections.join("\n")
}

/// Left-aligned columns separated by two spaces; long cells are cut.
pub fn render_preview(preview: Option<&TablePreview>) -> String {
    let Some(preview) = preview else {
        return String::new();
    };

    let mut widths: Vec<usize> = preview
        .headers
        .iter()
        .map(|h| truncate_cell(h, MAX_CELL_WIDTH).chars().count())
        .collect();
    for row in &preview.rows {
        for (idx, cell) in row.cells.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(truncate_cell(cell, MAX_CELL_WIDTH).chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&preview.headers, &widths));
    for row in &preview.rows {
        out.push_str(&render_line(&row.cells, &widths));
    }
    out
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", truncate_cell(cell, MAX_CELL_WIDTH), width = width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

pub fn render_statistics(stats: Option<&ProtoWeightStatistics>) -> String {
    let Some(stats) = stats else {
        return String::new();
    };
    let rows = [
        ("mean", stats.mean),
        ("std", stats.std),
        ("min", stats.min),
        ("25%", stats.p25),
        ("50%", stats.p50),
        ("75%", stats.p75),
        ("max", stats.max),
    ];

    let mut out = format!("{:<6}{}\n", "count", stats.count);
    for (label, value) in rows {
        out.push_str(&format!("{:<6}{}\n", label, format_decimal(value, 6)));
    }
    out
}
