//! Markdown report export.

use chrono::{DateTime, Utc};
use controlscope_core::Control;

/// Timestamp format used in the report header.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render records as a Markdown report.
///
/// The header carries the generation time and record count, followed by one
/// `## <id> - <title>` section per record. Optional sections are omitted
/// when the field is absent or empty.
#[must_use]
pub fn to_markdown(records: &[Control], generated_at: DateTime<Utc>) -> String {
    let mut out = String::from("# NIST 800-53 Rev 5 Security Controls\n\n");
    out.push_str(&format!(
        "Generated on: {}\n\n",
        generated_at.format(GENERATED_AT_FORMAT)
    ));
    out.push_str(&format!("Total Controls: {}\n\n", records.len()));
    out.push_str("---\n\n");

    for control in records {
        push_section(&mut out, control);
    }

    out
}

fn push_section(out: &mut String, control: &Control) {
    out.push_str(&format!("## {} - {}\n\n", control.id, control.title));
    out.push_str(&format!("**Family:** {}\n\n", control.family));

    if let Some(priority) = control.priority {
        out.push_str(&format!("**Priority:** {priority}\n\n"));
    }

    if !control.baseline.is_empty() {
        let levels: Vec<&str> = control.baseline.iter().map(|level| level.as_str()).collect();
        out.push_str(&format!("**Baseline:** {}\n\n", levels.join(", ")));
    }

    out.push_str(&format!("**Description:** {}\n\n", control.description));

    if let Some(text) = non_empty(control.control_text.as_deref()) {
        out.push_str(&format!("**Control Text:**\n\n{text}\n\n"));
    }

    if let Some(guidance) = non_empty(control.supplemental_guidance.as_deref()) {
        out.push_str(&format!("**Supplemental Guidance:**\n\n{guidance}\n\n"));
    }

    if !control.control_enhancements.is_empty() {
        out.push_str("**Control Enhancements:**\n\n");
        for enhancement in &control.control_enhancements {
            out.push_str(&format!("- **{}:** {}\n", enhancement.id, enhancement.title));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use controlscope_core::{ImpactLevel, Priority};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_empty_report() {
        let md = to_markdown(&[], now());
        assert_eq!(
            md,
            "# NIST 800-53 Rev 5 Security Controls\n\nGenerated on: 2025-03-14 09:30:05 UTC\n\nTotal Controls: 0\n\n---\n\n"
        );
        assert!(!md.contains("## "));
    }

    #[test]
    fn test_full_section() {
        let control =
            Control::new("AC-2", "Account Management", "Access Control", "Manage accounts.")
            .with_priority(Priority::P1)
            .with_baseline([ImpactLevel::Low, ImpactLevel::Moderate, ImpactLevel::High])
            .with_control_text("Define account types.")
            .with_supplemental_guidance("See AC-3.")
            .with_enhancement("AC-2(1)", "Automated System Account Management");

        let md = to_markdown(&[control], now());
        let expected_section = "## AC-2 - Account Management\n\n\
            **Family:** Access Control\n\n\
            **Priority:** P1\n\n\
            **Baseline:** Low, Moderate, High\n\n\
            **Description:** Manage accounts.\n\n\
            **Control Text:**\n\nDefine account types.\n\n\
            **Supplemental Guidance:**\n\nSee AC-3.\n\n\
            **Control Enhancements:**\n\n\
            - **AC-2(1):** Automated System Account Management\n\n\
            ---\n\n";

        assert!(md.contains("Total Controls: 1\n\n"));
        assert!(md.ends_with(expected_section));
    }

    #[test]
    fn test_optional_sections_omitted() {
        let control = Control::new("PM-1", "Program Plan", "Program Management", "Plan it.")
            .with_control_text("");

        let md = to_markdown(&[control], now());

        assert!(md.contains(
            "## PM-1 - Program Plan\n\n**Family:** Program Management\n\n\
             **Description:** Plan it.\n\n---\n\n"
        ));
        assert!(!md.contains("**Priority:**"));
        assert!(!md.contains("**Baseline:**"));
        assert!(!md.contains("**Control Text:**"));
        assert!(!md.contains("**Control Enhancements:**"));
        assert!(!md.contains("null"));
    }
}
