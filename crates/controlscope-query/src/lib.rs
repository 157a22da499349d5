//! Controlscope Query - search and filtering over the control catalog.
//!
//! Filtering is a pure function of the record list and a [`QueryPredicates`]
//! value: it never mutates its input and keeps the relative order of the
//! records it returns.
//!
//! # Example
//!
//! ```rust
//! use controlscope_core::{Control, ImpactLevel};
//! use controlscope_query::{filter, QueryPredicates};
//!
//! let records = vec![
//!     Control::new("AC-3", "Access Enforcement", "Access Control", "Enforce access.")
//!         .with_baseline([ImpactLevel::Low, ImpactLevel::High]),
//!     Control::new("AU-2", "Event Logging", "Audit and Accountability", "Log events."),
//! ];
//!
//! let predicates = QueryPredicates::new().with_text("access");
//! let view = filter(&records, &predicates);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].id.as_str(), "AC-3");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod filter;
pub mod predicates;
pub mod text;

// Re-export commonly used types
pub use filter::{filter, search};
pub use predicates::QueryPredicates;
pub use text::TextScope;
