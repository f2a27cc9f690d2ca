use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unsupported file type '{file_name}'. Please upload a CSV or Excel (.xlsx) file.")]
    UnsupportedFileType { file_name: String },

    #[error("Error reading file: {0}")]
    FileReadFailure(String),

    #[error("The uploaded file does not contain a '{column}' column. Please ensure your column is named '{column}' as per the template.")]
    MissingColumn { column: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Output encoding error: {0}")]
    OutputEncoding(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::FileReadFailure(err.to_string())
    }
}

impl From<calamine::XlsxError> for EngineError {
    fn from(err: calamine::XlsxError) -> Self {
        EngineError::FileReadFailure(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for EngineError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        EngineError::OutputEncoding(err.to_string())
    }
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err);
        let message = err.to_string();
        match err {
            EngineError::UnsupportedFileType { .. }
            | EngineError::FileReadFailure(_)
            | EngineError::InvalidRequest(_) => {
                tonic::Status::invalid_argument(message)
            }
            EngineError::MissingColumn { .. } | EngineError::ConfigError(_) => {
                tonic::Status::failed_precondition(message)
            }
            EngineError::OutputEncoding(_)
            | EngineError::IoError { .. }
            | EngineError::ProcessingError(_)
            | EngineError::AnyhowError(_) => tonic::Status::internal(message),
        }
    }
}
