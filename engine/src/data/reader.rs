// Table reader for uploaded CSV and XLSX files.
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use shared::models::CellValue;
use std::io::Cursor;

use super::file_kind::FileKind;
use super::table::Table;
use crate::error::EngineError;

/// Reads an uploaded file, choosing the parser from its extension.
pub fn read_table(file_name: &str, bytes: &[u8]) -> Result<Table, EngineError> {
    match FileKind::from_file_name(file_name)? {
        FileKind::Csv => read_csv(bytes),
        FileKind::Xlsx => read_xlsx(bytes),
    }
}

/// Comma-delimited, first line is the header. Short rows are padded; rows
/// with more fields than the header are rejected.
pub fn read_csv(bytes: &[u8]) -> Result<Table, EngineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(EngineError::FileReadFailure("No columns to parse from file".to_string()));
    }

    let mut table = Table::new(headers);
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| EngineError::FileReadFailure(format!("Error reading CSV record at line {}: {}", idx + 2, e)))?;
        if record.len() > table.headers().len() {
            return Err(EngineError::FileReadFailure(format!(
                "Expected {} fields in line {}, saw {}",
                table.headers().len(),
                idx + 2,
                record.len()
            )));
        }
        table.push_row(record.iter().map(csv_cell).collect());
    }
    Ok(table)
}

/// First worksheet only; its first row is the header.
pub fn read_xlsx(bytes: &[u8]) -> Result<Table, EngineError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::FileReadFailure("Workbook contains no worksheets".to_string()))??;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_text(idx, cell))
            .collect(),
        None => return Err(EngineError::FileReadFailure("No columns to parse from file".to_string())),
    };

    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row.iter().map(xlsx_cell).collect());
    }
    Ok(table)
}

fn csv_cell(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}

fn header_text(idx: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", idx),
        other => other.to_string(),
    }
}

fn xlsx_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_read_csv_valid_data() {
        let csv = "product_id,product_name,weight\n1,Toned Milk,500 ml\n2,Tender Coconut,1 pc\n";
        let table = read_table("products.csv", csv.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["product_id".to_string(), "product_name".to_string(), "weight".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1][2], CellValue::from("1 pc"));
    }

    #[test]
    fn test_read_csv_empty_cells_and_short_rows() {
        let csv = "product_id,weight,pack_size\n1,,x\n2,250g\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0][1], CellValue::Empty);
        assert_eq!(table.rows()[1], vec![CellValue::from("2"), CellValue::from("250g"), CellValue::Empty]);
    }

    #[test]
    fn test_read_csv_quoted_fields() {
        let csv = "product_name,weight\n\"Atta, Whole Wheat\",\"5 kg\"\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0][0], CellValue::from("Atta, Whole Wheat"));
    }

    #[test]
    fn test_read_csv_too_many_fields() {
        let csv = "product_id,weight\n1,500g,extra\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::FileReadFailure(_)));
        assert!(err.to_string().contains("Expected 2 fields in line 2, saw 3"));
    }

    #[test]
    fn test_read_csv_empty_file() {
        let err = read_csv(b"").unwrap_err();
        assert!(err.to_string().contains("No columns to parse from file"));
    }

    #[test]
    fn test_read_csv_invalid_utf8() {
        let bytes = b"product_id,weight\n1,\xff\xfeg\n";
        let err = read_csv(bytes).unwrap_err();
        assert!(matches!(err, EngineError::FileReadFailure(_)));
    }

    #[test]
    fn test_read_xlsx_keeps_cell_types() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "product_id").unwrap();
        sheet.write_string(0, 1, "weight").unwrap();
        sheet.write_number(1, 0, 101.0).unwrap();
        sheet.write_string(1, 1, "1.5kg").unwrap();
        sheet.write_number(2, 0, 102.0).unwrap();
        sheet.write_number(2, 1, 500.0).unwrap();
        sheet.write_number(3, 0, 103.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = read_table("products.xlsx", &bytes).unwrap();
        assert_eq!(table.headers(), &["product_id".to_string(), "weight".to_string()]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0], vec![CellValue::Number(101.0), CellValue::from("1.5kg")]);
        assert_eq!(table.rows()[1][1], CellValue::Number(500.0));
        assert_eq!(table.rows()[2][1], CellValue::Empty);
    }

    #[test]
    fn test_read_xlsx_booleans_keep_type() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "weight").unwrap();
        sheet.write_string(0, 1, "is_Nonmilk").unwrap();
        sheet.write_boolean(1, 0, true).unwrap();
        sheet.write_boolean(1, 1, false).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = read_table("products.xlsx", &bytes).unwrap();
        assert_eq!(table.rows()[0], vec![CellValue::Bool(true), CellValue::Bool(false)]);
        assert!(shared::normalize(&table.rows()[0][0]).is_unconvertible());
    }

    #[test]
    fn test_xlsx_error_cells_become_empty() {
        assert_eq!(xlsx_cell(&Data::Error(CellErrorType::Div0)), CellValue::Empty);
        assert_eq!(xlsx_cell(&Data::Error(CellErrorType::NA)), CellValue::Empty);
        assert_eq!(xlsx_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(xlsx_cell(&Data::Int(3)), CellValue::Number(3.0));
    }

    #[test]
    fn test_read_csv_strips_bom() {
        let table = read_csv(b"\xef\xbb\xbfweight,product_id\n500g,1\n").unwrap();
        assert_eq!(table.headers()[0], "weight");
        assert_eq!(table.column_index("weight"), Some(0));
    }

    #[test]
    fn test_read_xlsx_corrupt_bytes() {
        let err = read_table("products.xlsx", b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, EngineError::FileReadFailure(_)));
        assert!(err.to_string().starts_with("Error reading file:"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_table("products.xls", b"").unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedFileType { .. }));
    }
}
