// Downloadable, header-only product template.
use shared::models::TEMPLATE_COLUMNS;

use super::file_kind::FileKind;
use super::table::Table;
use super::writer::write_table;
use crate::error::EngineError;

pub const TEMPLATE_FILE_STEM: &str = "product_data_template";
pub const TEMPLATE_SHEET_NAME: &str = "ProductData";

/// A ready-to-download file: name, MIME type and bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

pub fn template_table() -> Table {
    Table::new(TEMPLATE_COLUMNS.iter().map(|c| c.to_string()).collect())
}

pub fn build_template(kind: FileKind) -> Result<Download, EngineError> {
    let content = write_table(&template_table(), kind, TEMPLATE_SHEET_NAME)?;
    Ok(Download {
        file_name: kind.file_name(TEMPLATE_FILE_STEM),
        mime_type: kind.mime_type().to_string(),
        content,
    })
}
