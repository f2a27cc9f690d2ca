// Conversions between domain values and the generated protobuf messages.
use crate::analysis::WeightStatistics;
use crate::data::{Download, FileKind, Table};
use crate::error::EngineError;
use crate::pipeline::ConversionOutcome;
use crate::services::{ConvertFileResponse, OutputFormat, ProtoWeightStatistics, TablePreview, TableRow};

pub fn to_grpc_preview(table: &Table) -> TablePreview {
    TablePreview {
        headers: table.headers().to_vec(),
        rows: table
            .rows()
            .iter()
            .map(|row| TableRow {
                cells: row.iter().map(|cell| cell.to_string()).collect(),
            })
            .collect(),
    }
}

pub fn to_grpc_statistics(stats: &WeightStatistics) -> ProtoWeightStatistics {
    ProtoWeightStatistics {
        count: stats.count as u64,
        mean: stats.mean,
        std: stats.std,
        min: stats.min,
        p25: stats.p25,
        p50: stats.p50,
        p75: stats.p75,
        max: stats.max,
    }
}

pub fn to_grpc_response(outcome: &ConversionOutcome, download: Download) -> ConvertFileResponse {
    ConvertFileResponse {
        row_count: outcome.row_count as u64,
        original_preview: Some(to_grpc_preview(&outcome.original_preview)),
        converted_preview: Some(to_grpc_preview(&outcome.converted_preview)),
        statistics: Some(to_grpc_statistics(&outcome.statistics)),
        unconvertible_count: outcome.unconvertible_count as u64,
        warning: outcome.warning(),
        unconvertible_sample: Some(to_grpc_preview(&outcome.unconvertible_sample)),
        file_name: download.file_name,
        mime_type: download.mime_type,
        content: download.content,
    }
}

/// Rejects enum values this server does not know instead of falling back to CSV.
pub fn file_kind_from_grpc(format: i32) -> Result<FileKind, EngineError> {
    match OutputFormat::try_from(format) {
        Ok(OutputFormat::Csv) => Ok(FileKind::Csv),
        Ok(OutputFormat::Xlsx) => Ok(FileKind::Xlsx),
        Err(_) => Err(EngineError::InvalidRequest(format!("Unknown output format: {}", format))),
    }
}

impl From<FileKind> for OutputFormat {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Csv => OutputFormat::Csv,
            FileKind::Xlsx => OutputFormat::Xlsx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    #[test]
    fn test_preview_renders_cells_as_text() {
        let mut table = Table::new(vec!["weight".into(), "weight_kg".into()]);
        table.push_row(vec!["500g".into(), CellValue::Number(0.5)]);
        table.push_row(vec!["N/A".into(), CellValue::Empty]);

        let preview = to_grpc_preview(&table);
        assert_eq!(preview.headers, vec!["weight", "weight_kg"]);
        assert_eq!(preview.rows[0].cells, vec!["500g", "0.5"]);
        assert_eq!(preview.rows[1].cells, vec!["N/A", ""]);
    }

    #[test]
    fn test_statistics_keep_undefined_values_unset() {
        let proto = to_grpc_statistics(&WeightStatistics::describe(&[1.2]));
        assert_eq!(proto.count, 1);
        assert_eq!(proto.mean, Some(1.2));
        assert_eq!(proto.std, None);
    }

    #[test]
    fn test_file_kind_from_grpc() {
        assert_eq!(file_kind_from_grpc(OutputFormat::Csv as i32).unwrap(), FileKind::Csv);
        assert_eq!(file_kind_from_grpc(OutputFormat::Xlsx as i32).unwrap(), FileKind::Xlsx);
        assert!(matches!(file_kind_from_grpc(42), Err(EngineError::InvalidRequest(_))));
        assert_eq!(OutputFormat::from(FileKind::Xlsx), OutputFormat::Xlsx);
    }
}
