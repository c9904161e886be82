use thiserror::Error;

/// Errors emitted by the translation engine.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The column's native type is outside the supported vocabulary; the run
    /// cannot continue.
    #[error("unknown field \"{table}.{column}\" {native}")]
    UnsupportedType {
        table: String,
        column: String,
        native: String,
    },
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
