// Table writer: serializes a table to CSV or XLSX bytes for download.
use rust_xlsxwriter::{Workbook, Worksheet};
use shared::models::CellValue;

use super::file_kind::FileKind;
use super::table::Table;
use crate::error::EngineError;

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

pub fn write_table(table: &Table, kind: FileKind, sheet_name: &str) -> Result<Vec<u8>, EngineError> {
    match kind {
        FileKind::Csv => write_csv(table),
        FileKind::Xlsx => write_xlsx(table, sheet_name),
    }
}

/// Header line plus one line per row; empty cells stay empty.
pub fn write_csv(table: &Table) -> Result<Vec<u8>, EngineError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.headers())
        .map_err(|e| EngineError::OutputEncoding(e.to_string()))?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| EngineError::OutputEncoding(e.to_string()))?;
    }
    wtr.into_inner()
        .map_err(|e| EngineError::OutputEncoding(e.to_string()))
}

pub fn write_xlsx(table: &Table, sheet_name: &str) -> Result<Vec<u8>, EngineError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, header) in table.headers().iter().enumerate() {
        sheet.write_string(0, excel_col(col)?, header.as_str())?;
    }
    for (idx, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(idx + 1)
            .map_err(|_| EngineError::OutputEncoding(format!("Row {} exceeds the spreadsheet limit", idx + 1)))?;
        for (col, cell) in row.iter().enumerate() {
            write_cell(sheet, excel_row, excel_col(col)?, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<(), EngineError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

fn excel_col(col: usize) -> Result<u16, EngineError> {
    u16::try_from(col)
        .map_err(|_| EngineError::OutputEncoding(format!("Column {} exceeds the spreadsheet limit", col)))
}
