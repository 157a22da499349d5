//! CSV export.

use controlscope_core::Control;

/// Header row, in column order.
pub const CSV_HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Family",
    "Priority",
    "Baseline",
    "Description",
    "Control Text",
    "Supplemental Guidance",
    "Enhancements",
];

/// Serialize records as CSV.
///
/// Every field is double-quoted with inner quotes doubled. Rows are joined
/// with `\n` and there is no trailing newline, so the output always has
/// `records.len() + 1` rows.
#[must_use]
pub fn to_csv(records: &[Control]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(join_row(CSV_HEADERS.iter().map(|header| (*header).to_string())));

    for control in records {
        rows.push(join_row(row_fields(control)));
    }

    rows.join("\n")
}

fn row_fields(control: &Control) -> [String; 9] {
    let baseline: Vec<&str> = control.baseline.iter().map(|level| level.as_str()).collect();
    let enhancements: Vec<String> = control
        .control_enhancements
        .iter()
        .map(|e| format!("{}: {}", e.id, e.title))
        .collect();

    [
        control.id.to_string(),
        control.title.clone(),
        control.family.clone(),
        control.priority.map(|p| p.to_string()).unwrap_or_default(),
        baseline.join("; "),
        control.description.clone(),
        control.control_text.clone().unwrap_or_default(),
        control.supplemental_guidance.clone().unwrap_or_default(),
        enhancements.join("; "),
    ]
}

fn join_row(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| quote(&field))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
