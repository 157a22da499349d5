//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while exporting records.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed
    #[error("failed to serialize controls to JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the artifact failed
    #[error("failed to write export to {path}: {source}")]
    Io {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Unknown export format or scope name
    #[error("unknown export {kind} '{value}'")]
    UnknownOption {
        /// What was being parsed (`format` or `scope`)
        kind: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
