use thiserror::Error;

/// Core error type shared across tosqla crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The snapshot violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The snapshot targets an engine or contract this build does not handle.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The snapshot could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by tosqla crates.
pub type Result<T> = std::result::Result<T, Error>;
