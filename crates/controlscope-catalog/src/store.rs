//! The loaded control catalog.

use crate::error::{FetchError, LoadError};
use crate::source::CatalogSource;
use controlscope_core::{Control, ControlId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the loaded record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrigin {
    /// The primary (remote) source answered
    Remote,
    /// The primary source failed and the fallback dataset was used
    Fallback,
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote catalog"),
            Self::Fallback => f.write_str("embedded fallback catalog"),
        }
    }
}

/// Summary figures for the catalog and the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Controls in the loaded catalog
    pub total_controls: usize,
    /// Controls in the current view
    pub displayed_controls: usize,
    /// Distinct families in the loaded catalog
    pub families: usize,
    /// Enhancements across the loaded catalog
    pub enhancements: usize,
}

/// Immutable record set loaded once per session.
///
/// Cloning is cheap; the records are shared.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Control]>,
    index: Arc<HashMap<ControlId, usize>>,
    families: Arc<[String]>,
    origin: LoadOrigin,
}

impl RecordStore {
    /// Load the catalog from `primary`, falling back to `fallback` on any
    /// fetch failure.
    ///
    /// # Errors
    /// Returns [`LoadError`] only when both sources fail.
    pub async fn load(
        primary: &dyn CatalogSource,
        fallback: &dyn CatalogSource,
    ) -> Result<Self, LoadError> {
        let primary_error = match fetch_non_empty(primary).await {
            Ok(records) => return Ok(Self::from_records(records, LoadOrigin::Remote)),
            Err(e) => e,
        };

        info!(
            source = primary.name(),
            fallback = fallback.name(),
            error = %primary_error,
            "primary catalog unavailable, using fallback"
        );

        match fetch_non_empty(fallback).await {
            Ok(records) => Ok(Self::from_records(records, LoadOrigin::Fallback)),
            Err(fallback_error) => Err(LoadError {
                primary: primary_error,
                fallback: fallback_error,
            }),
        }
    }

    /// Build a store from an already-fetched record list.
    ///
    /// Duplicate ids keep their first occurrence. Records that violate the
    /// model invariants are logged and kept.
    #[must_use]
    pub fn from_records(records: Vec<Control>, origin: LoadOrigin) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id.clone()) {
                warn!(control_id = %record.id, "dropping duplicate control record");
                continue;
            }

            for issue in record.validate() {
                debug!(
                    control_id = %record.id,
                    issue = %issue,
                    "tolerating malformed control record"
                );
            }

            kept.push(record);
        }

        let index: HashMap<ControlId, usize> = kept
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();

        let families: BTreeSet<&str> = kept
            .iter()
            .map(|record| record.family.as_str())
            .filter(|family| !family.is_empty())
            .collect();
        let families: Vec<String> = families.into_iter().map(str::to_string).collect();

        info!(
            count = kept.len(),
            families = families.len(),
            origin = %origin,
            "control catalog loaded"
        );

        Self {
            records: kept.into(),
            index: Arc::new(index),
            families: families.into(),
            origin,
        }
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[Control] {
        &self.records
    }

    /// Distinct family names, sorted lexicographically.
    #[must_use]
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Look up a control by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Control> {
        self.index
            .get(&ControlId::new(id))
            .map(|&position| &self.records[position])
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Which source produced the records.
    #[must_use]
    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Number of controls per family.
    #[must_use]
    pub fn count_by_family(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();

        for record in self.records.iter().filter(|r| !r.family.is_empty()) {
            *counts.entry(record.family.clone()).or_insert(0) += 1;
        }

        counts
    }

    /// Summary figures, given the size of the current view.
    #[must_use]
    pub fn stats(&self, displayed_controls: usize) -> CatalogStats {
        CatalogStats {
            total_controls: self.records.len(),
            displayed_controls,
            families: self.families.len(),
            enhancements: self.records.iter().map(Control::enhancement_count).sum(),
        }
    }
}

async fn fetch_non_empty(source: &dyn CatalogSource) -> crate::Result<Vec<Control>> {
    let records = source.fetch().await?;

    if records.is_empty() {
        return Err(FetchError::Shape {
            origin: source.name().to_string(),
            reason: "catalog contains no controls".to_string(),
        });
    }

    Ok(records)
}
