//! Controlscope Export - serializers for control catalog records.
//!
//! Each serializer is a pure function from a record list to text. Delivering
//! the text somewhere (a file, a test buffer) is the job of an
//! [`OutputSink`], kept separate so the serializers stay testable.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use controlscope_core::Control;
//! use controlscope_export::{
//!     render, ExportFormat, ExportRequest, ExportScope, MemorySink, OutputSink,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![Control::new("AC-1", "Policy and Procedures", "Access Control", "Policy.")];
//! let request = ExportRequest::new(ExportScope::All, ExportFormat::Csv);
//! let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
//!
//! let artifact = render(&request, &records, None, now)?;
//! assert_eq!(artifact.filename, "nist-800-53-all-controls-2025-03-14.csv");
//!
//! let sink = MemorySink::new();
//! sink.deliver(&artifact)?;
//! assert_eq!(sink.artifacts().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod csv;
pub mod error;
pub mod json;
pub mod markdown;
pub mod request;
pub mod sink;

// Re-export commonly used types
pub use csv::to_csv;
pub use error::{ExportError, Result};
pub use json::to_json;
pub use markdown::to_markdown;
pub use request::{
    export_filename, render, ExportArtifact, ExportFormat, ExportRequest, ExportScope,
};
pub use sink::{DirectorySink, MemorySink, OutputSink};
