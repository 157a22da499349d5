//! Fallback catalog compiled into the binary.
//!
//! The embedded document covers every SP 800-53 Rev. 5 control family with a
//! representative selection of controls, so the viewer never starts empty
//! because the remote API is unreachable.

use crate::error::Result;
use crate::source::{parse_catalog_document, CatalogSource};
use async_trait::async_trait;
use controlscope_core::Control;
use std::borrow::Cow;
use tracing::info;

/// Catalog document bundled at build time.
pub const EMBEDDED_CATALOG: &str = include_str!("../data/controls.json");

/// Source reading the bundled catalog document.
#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    document: Cow<'static, str>,
}

impl EmbeddedCatalog {
    /// Create a source over the bundled catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Cow::Borrowed(EMBEDDED_CATALOG),
        }
    }

    /// Create a source over an arbitrary catalog document.
    ///
    /// Used to point the fallback at a local file or to exercise a corrupt
    /// fallback in tests.
    #[must_use]
    pub fn from_document(document: impl Into<String>) -> Self {
        Self {
            document: Cow::Owned(document.into()),
        }
    }

    /// Parse the document synchronously.
    pub fn controls(&self) -> Result<Vec<Control>> {
        parse_catalog_document(self.name(), &self.document)
    }
}

impl Default for EmbeddedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for EmbeddedCatalog {
    async fn fetch(&self) -> Result<Vec<Control>> {
        let controls = self.controls()?;
        info!(count = controls.len(), "loaded embedded control catalog");
        Ok(controls)
    }

    fn name(&self) -> &str {
        "embedded catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_catalog_parses() {
        let controls = EmbeddedCatalog::new().controls().expect("parse embedded catalog");
        assert!(!controls.is_empty());
        assert!(controls.iter().all(|c| c.validate().is_empty()));
    }

    #[test]
    fn test_embedded_catalog_ids_are_unique() {
        let controls = EmbeddedCatalog::new().controls().expect("parse embedded catalog");
        let ids: HashSet<_> = controls.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), controls.len());
    }

    #[test]
    fn test_embedded_catalog_covers_all_families() {
        let controls = EmbeddedCatalog::new().controls().expect("parse embedded catalog");
        let families: HashSet<_> = controls.iter().map(|c| c.family.as_str()).collect();
        assert_eq!(families.len(), 20);
        assert!(families.contains("Supply Chain Risk Management"));
    }

    #[tokio::test]
    async fn test_corrupt_document_fails() {
        let source = EmbeddedCatalog::from_document("{\"controls\": [");
        let err = source.fetch().await.expect_err("corrupt document must fail");
        assert!(matches!(err, FetchError::Json { .. }));
    }
}
