//! Free-text matching against control fields.

use controlscope_core::Control;

/// Which fields a text term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScope {
    /// Every searchable field: id, title, family, description, control text,
    /// supplemental guidance, priority, baselines and enhancements.
    Broad,
    /// Only id, title, description and control text.
    ///
    /// Applied when a family filter is active alongside a text term.
    Narrow,
}

/// Lowercased search term, or `None` when the text is blank.
#[must_use]
pub fn normalize_term(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

/// Whether any field in `scope` contains `term`.
///
/// `term` must already be lowercased (see [`normalize_term`]). Absent
/// optional fields never match.
#[must_use]
pub fn matches_text(control: &Control, term: &str, scope: TextScope) -> bool {
    searchable_fields(control, scope)
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn searchable_fields(control: &Control, scope: TextScope) -> Vec<String> {
    let mut fields = vec![control.id.to_string(), control.title.clone()];

    if scope == TextScope::Broad {
        fields.push(control.family.clone());
    }

    fields.push(control.description.clone());
    fields.extend(control.control_text.clone());

    if scope == TextScope::Narrow {
        return fields;
    }

    fields.extend(control.supplemental_guidance.clone());
    fields.extend(control.priority.map(|p| p.to_string()));

    if !control.baseline.is_empty() {
        let baseline: Vec<&str> = control.baseline.iter().map(|level| level.as_str()).collect();
        fields.push(baseline.join(" "));
    }

    if !control.control_enhancements.is_empty() {
        let enhancements: Vec<String> = control
            .control_enhancements
            .iter()
            .map(|e| format!("{} {}", e.id, e.title))
            .collect();
        fields.push(enhancements.join(" "));
    }

    fields
}
