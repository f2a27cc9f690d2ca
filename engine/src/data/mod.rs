// Tabular I/O: the in-memory table, upload readers, download writers and the template.
pub mod file_kind;
pub mod reader;
pub mod table;
pub mod template;
pub mod writer;

pub use file_kind::FileKind;
pub use table::Table;
pub use template::Download;
