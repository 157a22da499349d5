//! Export command.

use std::path::Path;

use chrono::{DateTime, Utc};
use controlscope_export::{DirectorySink, ExportFormat, ExportRequest, ExportScope};

use crate::error::CommandError;
use crate::output::render_one;
use crate::state::CatalogView;

/// Export the selected records into `dir`.
pub fn export(
    view: &CatalogView,
    scope: ExportScope,
    format: ExportFormat,
    dir: &Path,
    now: DateTime<Utc>,
    json: bool,
) -> Result<String, CommandError> {
    let sink = DirectorySink::new(dir);
    let receipt = view.export(&ExportRequest::new(scope, format), now, &sink)?;

    render_one(json, receipt, |r| {
        format!(
            "Exported {} controls ({}) to {}\n",
            r.records,
            r.format,
            r.path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use controlscope_catalog::{LoadOrigin, RecordStore};
    use controlscope_core::Control;

    #[test]
    fn test_export_writes_file() {
        let mut view = CatalogView::from_store(RecordStore::from_records(
            vec![
                Control::new("AC-1", "Policy and Procedures", "Access Control", "Policy."),
                Control::new(
                    "AU-1",
                    "Policy and Procedures",
                    "Audit and Accountability",
                    "Policy.",
                ),
            ],
            LoadOrigin::Fallback,
        ));
        view.set_family(Some("Audit and Accountability".to_string()));

        let temp = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
        let out = export(
            &view,
            ExportScope::CurrentView,
            ExportFormat::Markdown,
            temp.path(),
            now,
            false,
        )
        .unwrap();

        let path = temp
            .path()
            .join("nist-800-53-audit-and-accountability-controls-2025-02-03.md");
        assert!(out.starts_with("Exported 1 controls (markdown) to "));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("## AU-1 - Policy and Procedures"));
        assert!(!written.contains("AC-1"));
    }
}
