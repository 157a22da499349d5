//! Catalog sources.
//!
//! A [`CatalogSource`] produces the full record set in one call. The record
//! store is handed its sources explicitly, so tests can swap the network
//! client for an in-memory double.

use crate::error::{FetchError, Result};
use async_trait::async_trait;
use controlscope_core::Control;
use serde_json::Value;
use tracing::{debug, warn};

/// Something that can produce the control catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every control record the source knows about.
    ///
    /// # Errors
    /// Returns error if the source cannot produce a usable record set.
    async fn fetch(&self) -> Result<Vec<Control>>;

    /// Human-readable source name for logs and error messages.
    fn name(&self) -> &str;
}

/// Parse a catalog document of the form `{"controls": [...]}`.
///
/// Records that don't deserialize are skipped with a warning. A document
/// without a non-empty `controls` array, or one where no record survives,
/// is a shape error.
pub fn parse_catalog_document(origin: &str, text: &str) -> Result<Vec<Control>> {
    let document: Value = serde_json::from_str(text).map_err(|e| FetchError::Json {
        origin: origin.to_string(),
        source: e,
    })?;

    let items = match document {
        Value::Object(mut map) => match map.remove("controls") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(FetchError::Shape {
                    origin: origin.to_string(),
                    reason: "missing `controls` array".to_string(),
                })
            }
        },
        _ => {
            return Err(FetchError::Shape {
                origin: origin.to_string(),
                reason: "document is not a JSON object".to_string(),
            })
        }
    };

    if items.is_empty() {
        return Err(FetchError::Shape {
            origin: origin.to_string(),
            reason: "`controls` array is empty".to_string(),
        });
    }

    let total = items.len();
    let mut controls = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Control>(item) {
            Ok(control) => controls.push(control),
            Err(e) => {
                warn!(origin, index, error = %e, "skipping malformed control record");
            }
        }
    }

    if controls.is_empty() {
        return Err(FetchError::Shape {
            origin: origin.to_string(),
            reason: format!("none of the {total} control records could be parsed"),
        });
    }

    debug!(origin, parsed = controls.len(), total, "parsed catalog document");

    Ok(controls)
}

/// In-memory source over a fixed record list.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    name: String,
    controls: Vec<Control>,
}

impl StaticCatalog {
    /// Create a source that always returns `controls`.
    #[must_use]
    pub fn new(name: impl Into<String>, controls: Vec<Control>) -> Self {
        Self {
            name: name.into(),
            controls,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<Control>> {
        Ok(self.controls.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Source that always fails; stands in for an unreachable or disabled remote.
#[derive(Debug, Clone)]
pub struct FailingCatalog {
    name: String,
    reason: String,
}

impl FailingCatalog {
    /// Create a source that fails with `reason`.
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for FailingCatalog {
    async fn fetch(&self) -> Result<Vec<Control>> {
        Err(FetchError::Unavailable {
            origin: self.name.clone(),
            reason: self.reason.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
