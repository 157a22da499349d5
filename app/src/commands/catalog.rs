//! Browsing commands: list, show, families, stats.

use controlscope_catalog::{CatalogStats, LoadOrigin};
use controlscope_core::Control;
use serde::Serialize;

use crate::error::CommandError;
use crate::output::{render_list, render_one};
use crate::state::{CatalogView, NO_RESULTS_MESSAGE};

#[derive(Serialize)]
struct FamilySummary<'a> {
    name: &'a str,
    controls: usize,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: CatalogStats,
    origin: LoadOrigin,
}

/// One-line summary of a control.
fn summary_row(control: &Control) -> String {
    let priority = control.priority.map(|p| p.as_str()).unwrap_or("--");
    let baseline: Vec<&str> = control.baseline.iter().map(|l| l.as_str()).collect();
    format!(
        "{:<10} {:<3} {:<22} {} ({})",
        control.id.as_str(),
        priority,
        baseline.join("/"),
        control.title,
        control.family
    )
}

/// Controls in the current view.
pub fn list(view: &CatalogView, json: bool) -> Result<String, CommandError> {
    if json {
        return render_list(true, view.view(), summary_row);
    }
    if view.is_no_results() {
        return Ok(format!("{NO_RESULTS_MESSAGE}\n"));
    }

    let mut out = render_list(false, view.view(), summary_row)?;
    out.push_str(&format!(
        "\nShowing {} of {} controls\n",
        view.view().len(),
        view.store().len()
    ));
    Ok(out)
}

/// Full detail of one control.
pub fn show(view: &CatalogView, id: &str, json: bool) -> Result<String, CommandError> {
    let control = view
        .control(id)
        .ok_or_else(|| CommandError::control_not_found(id))?;
    render_one(json, control, |c| detail(c))
}

fn detail(control: &Control) -> String {
    let mut out = format!("{} - {}\n", control.id, control.title);
    out.push_str(&format!("Family:   {}\n", control.family));
    if let Some(priority) = control.priority {
        out.push_str(&format!("Priority: {priority}\n"));
    }
    if !control.baseline.is_empty() {
        let levels: Vec<&str> = control.baseline.iter().map(|l| l.as_str()).collect();
        out.push_str(&format!("Baseline: {}\n", levels.join(", ")));
    }

    out.push_str(&format!("\nDescription:\n{}\n", control.description));
    if let Some(text) = control.control_text.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("\nControl Text:\n{text}\n"));
    }
    if let Some(guidance) = control.supplemental_guidance.as_deref().filter(|g| !g.is_empty()) {
        out.push_str(&format!("\nSupplemental Guidance:\n{guidance}\n"));
    }
    if !control.control_enhancements.is_empty() {
        out.push_str("\nEnhancements:\n");
        for enhancement in &control.control_enhancements {
            out.push_str(&format!("  {}: {}\n", enhancement.id, enhancement.title));
        }
    }
    out
}

/// Family names with their control counts, sorted by name.
pub fn families(view: &CatalogView, json: bool) -> Result<String, CommandError> {
    let counts = view.store().count_by_family();
    let summaries: Vec<FamilySummary<'_>> = view
        .families()
        .iter()
        .map(|name| FamilySummary {
            name,
            controls: counts.get(name).copied().unwrap_or(0),
        })
        .collect();

    render_list(json, &summaries, |f| format!("{:>4}  {}", f.controls, f.name))
}

/// Summary counts for the catalog and the current view.
pub fn stats(view: &CatalogView, json: bool) -> Result<String, CommandError> {
    let report = StatsReport {
        stats: view.stats(),
        origin: view.store().origin(),
    };

    render_one(json, report, |r| {
        format!(
            "Total controls:     {}\n\
             Displayed controls: {}\n\
             Families:           {}\n\
             Enhancements:       {}\n\
             Source:             {}\n",
            r.stats.total_controls,
            r.stats.displayed_controls,
            r.stats.families,
            r.stats.enhancements,
            r.origin
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use controlscope_catalog::RecordStore;
    use controlscope_core::{ImpactLevel, Priority};

    fn view() -> CatalogView {
        CatalogView::from_store(RecordStore::from_records(
            vec![
                Control::new("AC-2", "Account Management", "Access Control", "Manage accounts.")
                    .with_priority(Priority::P1)
                    .with_baseline([ImpactLevel::Low, ImpactLevel::High])
                    .with_enhancement("AC-2(1)", "Automated System Account Management"),
                Control::new("PM-1", "Program Plan", "Program Management", "Plan."),
            ],
            LoadOrigin::Remote,
        ))
    }

    #[test]
    fn test_list_no_results_message() {
        let mut view = view();
        view.set_search_text("nothing matches this");
        assert_eq!(
            list(&view, false).unwrap(),
            "No controls found matching your search criteria.\n"
        );
    }

    #[test]
    fn test_list_json_is_empty_array_on_no_results() {
        let mut view = view();
        view.set_search_text("nothing matches this");
        let value: serde_json::Value = serde_json::from_str(&list(&view, true).unwrap()).unwrap();
        assert_eq!(value["data"], serde_json::json!([]));
    }

    #[test]
    fn test_list_text_rows() {
        let out = list(&view(), false).unwrap();
        assert!(out.contains("AC-2       P1  Low/High"));
        assert!(out.contains("PM-1       --"));
        assert!(out.ends_with("Showing 2 of 2 controls\n"));
    }

    #[test]
    fn test_show_detail_and_missing() {
        let view = view();
        let out = show(&view, "AC-2", false).unwrap();
        assert!(out.starts_with("AC-2 - Account Management\n"));
        assert!(out.contains("Baseline: Low, High"));
        assert!(out.contains("  AC-2(1): Automated System Account Management"));

        let err = show(&view, "XX-1", false).unwrap_err();
        assert_eq!(err.code, "CONTROL_NOT_FOUND");
    }

    #[test]
    fn test_families_counts() {
        let out = families(&view(), false).unwrap();
        assert_eq!(out, "   1  Access Control\n   1  Program Management\n");
    }

    #[test]
    fn test_stats_json() {
        let mut view = view();
        view.set_priority(Some(Priority::P1));
        let value: serde_json::Value = serde_json::from_str(&stats(&view, true).unwrap()).unwrap();
        assert_eq!(value["data"]["total_controls"], 2);
        assert_eq!(value["data"]["displayed_controls"], 1);
        assert_eq!(value["data"]["enhancements"], 1);
        assert_eq!(value["data"]["origin"], "remote");
    }
}
