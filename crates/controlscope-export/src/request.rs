//! Export requests, file naming and rendering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use controlscope_core::Control;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ExportError, Result};
use crate::{to_csv, to_json, to_markdown};

/// Which records an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    /// Every record in the store
    All,
    /// The currently filtered view
    #[default]
    CurrentView,
}

impl ExportScope {
    /// Pick the record list this scope refers to.
    #[must_use]
    pub fn select<'a>(self, all: &'a [Control], view: &'a [Control]) -> &'a [Control] {
        match self {
            Self::All => all,
            Self::CurrentView => view,
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::CurrentView => "current",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportScope {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "current" | "current-view" | "view" | "filtered" => Ok(Self::CurrentView),
            _ => Err(ExportError::UnknownOption {
                kind: "scope",
                value: s.to_string(),
            }),
        }
    }
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Fully quoted CSV
    Csv,
    /// Markdown report
    Markdown,
}

impl ExportFormat {
    /// All formats, in menu order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Csv, Self::Markdown];

    /// File extension without the dot
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// MIME type of the rendered artifact
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "markdown",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(ExportError::UnknownOption {
                kind: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// What to export and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Record selection
    pub scope: ExportScope,
    /// Output format
    pub format: ExportFormat,
}

impl ExportRequest {
    /// Create a request
    #[must_use]
    pub fn new(scope: ExportScope, format: ExportFormat) -> Self {
        Self { scope, format }
    }
}

/// A rendered export, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name
    pub filename: String,
    /// MIME type of `contents`
    pub mime_type: &'static str,
    /// Serialized records
    pub contents: String,
}

static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

// Characters that would let a family name escape the output directory.
static PATH_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/\\.:\x00-\x1f]").expect("valid path regex"));

/// Build the export file name.
///
/// `nist-800-53-<scope>-controls-<date>.<ext>` where the scope segment is
/// `all` for a full export, the lowercased family with whitespace runs
/// replaced by `-` when a family filter is active, and `filtered` otherwise.
/// Path separators, dots and control characters in the family also become
/// `-`, so the name never leaves the output directory.
#[must_use]
pub fn export_filename(
    scope: ExportScope,
    family: Option<&str>,
    format: ExportFormat,
    date: NaiveDate,
) -> String {
    let segment = match (scope, family.filter(|f| !f.is_empty())) {
        (ExportScope::All, _) => "all".to_string(),
        (ExportScope::CurrentView, Some(family)) => {
            let lowered = family.to_lowercase();
            let hyphenated = WHITESPACE_RUNS.replace_all(&lowered, "-");
            PATH_UNSAFE.replace_all(&hyphenated, "-").into_owned()
        }
        (ExportScope::CurrentView, None) => "filtered".to_string(),
    };

    format!(
        "nist-800-53-{segment}-controls-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Serialize `records` per `request` and name the result.
///
/// `records` must already be the list selected by the request scope (see
/// [`ExportScope::select`]); `family` is the active family filter, used only
/// for naming.
pub fn render(
    request: &ExportRequest,
    records: &[Control],
    family: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    let contents = match request.format {
        ExportFormat::Json => to_json(records)?,
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Markdown => to_markdown(records, now),
    };
    let filename = export_filename(request.scope, family, request.format, now.date_naive());

    info!(
        filename = %filename,
        format = %request.format,
        scope = %request.scope,
        records = records.len(),
        "Rendered export"
    );

    Ok(ExportArtifact {
        filename,
        mime_type: request.format.mime_type(),
        contents,
    })
}
