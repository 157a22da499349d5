//! Controlscope Catalog - the record store behind the control catalog viewer.
//!
//! This crate loads the control catalog once per session, preferring a remote
//! catalog API and falling back to a dataset compiled into the binary, and
//! exposes the loaded records for lookup and querying.
//!
//! # Architecture
//!
//! - **Sources** ([`source`]): The [`CatalogSource`] trait plus in-memory sources
//! - **HTTP** ([`http`]): Remote catalog API client with a bounded timeout
//! - **Embedded** ([`embedded`]): Fallback dataset shipped inside the binary
//! - **Store** ([`store`]): Immutable loaded record set with fallback handling
//! - **Errors** ([`error`]): Fetch and load error types
//!
//! # Example
//!
//! ```rust,no_run
//! use controlscope_catalog::{EmbeddedCatalog, HttpCatalogSource, RecordStore};
//! use controlscope_core::CatalogConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let remote = HttpCatalogSource::from_config(&CatalogConfig::default())?;
//! let store = RecordStore::load(&remote, &EmbeddedCatalog::new()).await?;
//!
//! println!("{} controls from {:?}", store.len(), store.origin());
//! for family in store.families() {
//!     println!("{family}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod embedded;
pub mod error;
pub mod http;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use embedded::EmbeddedCatalog;
pub use error::{FetchError, LoadError, Result};
pub use http::HttpCatalogSource;
pub use source::{parse_catalog_document, CatalogSource, FailingCatalog, StaticCatalog};
pub use store::{CatalogStats, LoadOrigin, RecordStore};
