//! Request-scoped conversion pipeline.
//!
//! One upload goes through read → normalize the `weight` column → summarize.
//! Everything a run needs travels in [`ConversionContext`]; nothing is kept
//! between runs.

use shared::models::{
    CellValue, NormalizedWeight, CONVERTED_PREVIEW_COLUMNS, UNCONVERTIBLE_SAMPLE_COLUMNS, WEIGHT_COLUMN,
    WEIGHT_KG_COLUMN,
};
use shared::normalizer::normalize;
use uuid::Uuid;

use crate::analysis::WeightStatistics;
use crate::config::PreviewSettings;
use crate::data::reader::read_table;
use crate::data::writer::write_table;
use crate::data::{Download, FileKind, Table};
use crate::error::EngineError;

pub const CONVERTED_FILE_STEM: &str = "converted_product_weights";
pub const CONVERTED_SHEET_NAME: &str = "ProductData";

/// Per-run context: a request id for log correlation and the preview sizes.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub request_id: Uuid,
    pub preview: PreviewSettings,
}

impl ConversionContext {
    pub fn new(preview: PreviewSettings) -> Self {
        ConversionContext {
            request_id: Uuid::new_v4(),
            preview,
        }
    }
}

/// Everything produced by one successful run.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub row_count: usize,
    pub original_preview: Table,
    pub converted_preview: Table,
    pub statistics: WeightStatistics,
    pub unconvertible_count: usize,
    pub unconvertible_sample: Table,
    /// The uploaded table plus the `weight_kg` column.
    pub table: Table,
}

impl ConversionOutcome {
    pub fn warning(&self) -> Option<String> {
        (self.unconvertible_count > 0).then(|| {
            format!(
                "Warning: {} entries in the '{}' column could not be converted to kg.",
                self.unconvertible_count, WEIGHT_COLUMN
            )
        })
    }

    pub fn export(&self, kind: FileKind) -> Result<Download, EngineError> {
        Ok(Download {
            file_name: kind.file_name(CONVERTED_FILE_STEM),
            mime_type: kind.mime_type().to_string(),
            content: write_table(&self.table, kind, CONVERTED_SHEET_NAME)?,
        })
    }
}

/// Normalizes every `weight` cell and stores the results in `weight_kg`.
pub fn convert_weights(table: &mut Table) -> Result<Vec<NormalizedWeight>, EngineError> {
    let column = table.column(WEIGHT_COLUMN).ok_or_else(|| EngineError::MissingColumn {
        column: WEIGHT_COLUMN.to_string(),
    })?;

    let weights: Vec<NormalizedWeight> = column
        .enumerate()
        .map(|(row, cell)| {
            let weight = normalize(cell);
            if weight.is_unconvertible() {
                tracing::debug!(row, raw = %cell, "weight could not be converted");
            }
            weight
        })
        .collect();

    table.set_column(WEIGHT_KG_COLUMN, weights.iter().map(|w| CellValue::from(*w)).collect());
    Ok(weights)
}

/// Runs a whole upload. File-level problems abort with an error; cells that
/// cannot be converted are only counted and sampled.
pub fn process_upload(
    ctx: &ConversionContext,
    file_name: &str,
    bytes: &[u8],
) -> Result<ConversionOutcome, EngineError> {
    let span = tracing::info_span!("convert", request_id = %ctx.request_id, file_name);
    let _guard = span.enter();

    let mut table = read_table(file_name, bytes)?;
    tracing::info!(row_count = table.row_count(), columns = table.headers().len(), "table loaded");

    let original_preview = table.head(ctx.preview.original_rows);
    let weights = convert_weights(&mut table)?;

    let kilograms: Vec<f64> = weights.iter().filter_map(NormalizedWeight::as_kg).collect();
    let unconvertible_mask: Vec<bool> = weights.iter().map(NormalizedWeight::is_unconvertible).collect();
    let unconvertible_count = weights.len() - kilograms.len();

    if unconvertible_count > 0 {
        tracing::warn!(unconvertible = unconvertible_count, "some weights could not be converted");
    }

    let outcome = ConversionOutcome {
        row_count: table.row_count(),
        original_preview,
        converted_preview: table
            .select(&CONVERTED_PREVIEW_COLUMNS)
            .head(ctx.preview.converted_rows),
        statistics: WeightStatistics::describe(&kilograms),
        unconvertible_count,
        unconvertible_sample: table
            .filter_rows(&unconvertible_mask)
            .select(&UNCONVERTIBLE_SAMPLE_COLUMNS)
            .head(ctx.preview.unconvertible_rows),
        table,
    };
    tracing::info!(row_count = outcome.row_count, unconvertible = unconvertible_count, "conversion finished");
    Ok(outcome)
}
