//! View controller: the loaded catalog plus the active query.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use controlscope_catalog::{
    CatalogSource, CatalogStats, FetchError, LoadError, LoadOrigin, RecordStore,
};
use controlscope_core::{Control, ImpactLevel, Priority};
use controlscope_export::{
    render, ExportError, ExportFormat, ExportRequest, ExportScope, OutputSink,
};
use controlscope_query::{filter, QueryPredicates};
use serde::Serialize;
use tracing::debug;

/// Message shown when the current view is empty.
pub const NO_RESULTS_MESSAGE: &str = "No controls found matching your search criteria.";

/// Owns the record store, the current predicates and the filtered view.
///
/// Every predicate change re-runs the query, so `view()` always reflects the
/// latest predicates.
#[derive(Debug, Clone)]
pub struct CatalogView {
    store: RecordStore,
    predicates: QueryPredicates,
    view: Vec<Control>,
}

/// Outcome of a delivered export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    /// Where the sink put the artifact
    pub path: PathBuf,
    /// Artifact file name
    pub filename: String,
    /// Artifact MIME type
    pub mime_type: &'static str,
    /// Format used
    pub format: ExportFormat,
    /// Scope used
    pub scope: ExportScope,
    /// Number of records exported
    pub records: usize,
}

impl CatalogView {
    /// Load the store from `primary`, falling back to `fallback`.
    pub async fn load(
        primary: &dyn CatalogSource,
        fallback: &dyn CatalogSource,
    ) -> Result<Self, LoadError> {
        Ok(Self::from_store(RecordStore::load(primary, fallback).await?))
    }

    /// Load the store from the fallback source only, without touching the
    /// network.
    pub async fn load_offline(fallback: &dyn CatalogSource) -> Result<Self, LoadError> {
        let offline = || FetchError::Unavailable {
            origin: "remote catalog".to_string(),
            reason: "offline mode".to_string(),
        };

        match fallback.fetch().await {
            Ok(records) if !records.is_empty() => Ok(Self::from_store(
                RecordStore::from_records(records, LoadOrigin::Fallback),
            )),
            Ok(_) => Err(LoadError {
                primary: offline(),
                fallback: FetchError::Shape {
                    origin: fallback.name().to_string(),
                    reason: "catalog contains no controls".to_string(),
                },
            }),
            Err(fallback_error) => Err(LoadError {
                primary: offline(),
                fallback: fallback_error,
            }),
        }
    }

    /// Wrap an already-loaded store with empty predicates.
    #[must_use]
    pub fn from_store(store: RecordStore) -> Self {
        let view = store.records().to_vec();
        Self {
            store,
            predicates: QueryPredicates::default(),
            view,
        }
    }

    /// Fetch a fresh store and re-apply the current predicates.
    ///
    /// On failure the existing store is kept.
    pub async fn reload(
        &mut self,
        primary: &dyn CatalogSource,
        fallback: &dyn CatalogSource,
    ) -> Result<(), LoadError> {
        self.store = RecordStore::load(primary, fallback).await?;
        self.refresh();
        Ok(())
    }

    /// Set the free-text term.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.predicates.text = text.into();
        self.refresh();
    }

    /// Set or clear the family filter.
    pub fn set_family(&mut self, family: Option<String>) {
        self.predicates.set_family(family);
        self.refresh();
    }

    /// Set or clear the baseline filter.
    pub fn set_baseline(&mut self, baseline: Option<ImpactLevel>) {
        self.predicates.baseline = baseline;
        self.refresh();
    }

    /// Set or clear the priority filter.
    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.predicates.priority = priority;
        self.refresh();
    }

    /// Replace every predicate at once.
    pub fn apply(&mut self, predicates: QueryPredicates) {
        self.predicates = predicates;
        self.refresh();
    }

    /// Drop every predicate; the view becomes the full store.
    pub fn clear_filters(&mut self) {
        self.apply(QueryPredicates::default());
    }

    fn refresh(&mut self) {
        self.view = filter(self.store.records(), &self.predicates);
        debug!(
            displayed = self.view.len(),
            total = self.store.len(),
            "View refreshed"
        );
    }

    /// Records matching the current predicates, in store order.
    #[must_use]
    pub fn view(&self) -> &[Control] {
        &self.view
    }

    /// Whether the current predicates match nothing.
    #[must_use]
    pub fn is_no_results(&self) -> bool {
        self.view.is_empty()
    }

    /// Current predicates
    #[must_use]
    pub fn predicates(&self) -> &QueryPredicates {
        &self.predicates
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Family names for the family selector.
    #[must_use]
    pub fn families(&self) -> &[String] {
        self.store.families()
    }

    /// Summary counts for the full store and the current view.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.store.stats(self.view.len())
    }

    /// Look up one control by id, regardless of the current predicates.
    #[must_use]
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.store.get(id)
    }

    /// Render the records selected by `request` and hand them to `sink`.
    ///
    /// `All` exports the whole store; `CurrentView` exports the filtered view,
    /// even when it is empty.
    pub fn export(
        &self,
        request: &ExportRequest,
        now: DateTime<Utc>,
        sink: &dyn OutputSink,
    ) -> Result<ExportReceipt, ExportError> {
        let records = request.scope.select(self.store.records(), &self.view);
        let artifact = render(request, records, self.predicates.active_family(), now)?;
        let path = sink.deliver(&artifact)?;

        Ok(ExportReceipt {
            path,
            filename: artifact.filename,
            mime_type: artifact.mime_type,
            format: request.format,
            scope: request.scope,
            records: records.len(),
        })
    }
}
