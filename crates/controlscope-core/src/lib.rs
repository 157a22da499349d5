//! Controlscope Core - Foundation crate for the control catalog viewer.
//!
//! This crate provides the control record model, error handling and
//! configuration management that the other Controlscope crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Catalog record types (`Control`, `ControlId`, `Priority`, `ImpactLevel`)
//!
//! # Example
//!
//! ```rust
//! use controlscope_core::{AppConfig, ImpactLevel, Priority};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.catalog.timeout_secs, 30);
//!
//! let level: ImpactLevel = "moderate".parse().unwrap();
//! assert_eq!(level, ImpactLevel::Moderate);
//! assert_eq!(Priority::P1.to_string(), "P1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CatalogConfig, ExportConfig};
pub use error::{ConfigError, ConfigResult, ControlscopeError};
pub use types::{Control, ControlId, Enhancement, ImpactLevel, Priority, RecordIssue};
