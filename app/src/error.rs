//! Error type reported by command handlers.

use std::fmt;

use controlscope_catalog::{FetchError, LoadError};
use controlscope_core::ConfigError;
use controlscope_export::ExportError;
use serde::Serialize;

/// Serializable command failure.
///
/// Printed as text on stderr, or as the `error` object of the JSON envelope
/// under `--json`.
#[derive(Debug, Serialize)]
pub struct CommandError {
    /// Stable error code (e.g. "CATALOG_UNAVAILABLE")
    pub code: String,
    /// User-facing message
    pub message: String,
    /// Optional structured context
    pub details: Option<serde_json::Value>,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a command error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// No control has the requested id.
    pub fn control_not_found(id: &str) -> Self {
        Self::with_details(
            "CONTROL_NOT_FOUND",
            format!("No control with id '{id}'"),
            serde_json::json!({ "id": id }),
        )
    }

    /// Retry hint carried in `details`, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.details.as_ref()?.get("hint")?.as_str()
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// Both catalog sources failed.
impl From<LoadError> for CommandError {
    fn from(err: LoadError) -> Self {
        Self::with_details(
            "CATALOG_UNAVAILABLE",
            format!("Failed to load the control catalog: {err}"),
            serde_json::json!({
                "primary": err.primary.to_string(),
                "fallback": err.fallback.to_string(),
                "hint": "Check the catalog URL and network access, then retry.",
            }),
        )
    }
}

impl From<FetchError> for CommandError {
    fn from(err: FetchError) -> Self {
        Self::new("CATALOG_SOURCE_ERROR", format!("Catalog source error: {err}"))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::new("CONFIG_ERROR", format!("Configuration error: {err}"))
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io { path, source } => Self::with_details(
                "EXPORT_WRITE_FAILED",
                format!("Failed to write export: {source}"),
                serde_json::json!({ "path": path }),
            ),
            ExportError::UnknownOption { kind, value } => Self::new(
                "INVALID_EXPORT_OPTION",
                format!("Unknown export {kind} '{value}'"),
            ),
            ExportError::Json(e) => {
                Self::new("SERIALIZATION_ERROR", format!("Serialization error: {e}"))
            }
        }
    }
}

/// Convert std::io::Error to CommandError.
impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::new("FILESYSTEM_ERROR", format!("Filesystem error: {err}"))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::new("SERIALIZATION_ERROR", format!("Serialization error: {err}"))
    }
}
