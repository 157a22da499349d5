//! Stable filtering of record lists.

use crate::predicates::QueryPredicates;
use crate::text::{matches_text, normalize_term, TextScope};
use controlscope_core::Control;
use tracing::debug;

/// Apply `predicates` to `records`.
///
/// Pure and stable: the result is the subsequence of `records` satisfying
/// every active predicate, in original order. Empty predicates return the
/// whole list.
///
/// When a family and a text term are both active, the family narrows the
/// set first and the text is then matched against id, title, description and
/// control text only. Without a family the text is matched against every
/// searchable field. A text search combined with a family filter can
/// therefore miss records that the same text search alone would return.
#[must_use]
pub fn filter(records: &[Control], predicates: &QueryPredicates) -> Vec<Control> {
    let term = normalize_term(&predicates.text);

    let matched: Vec<Control> = records
        .iter()
        .filter(|control| predicates.matches_term(control, term.as_deref()))
        .cloned()
        .collect();

    debug!(
        total = records.len(),
        matched = matched.len(),
        family = predicates.active_family(),
        "filtered control catalog"
    );

    matched
}

/// Free-text search across every searchable field.
///
/// Blank text returns every record.
#[must_use]
pub fn search(records: &[Control], text: &str) -> Vec<Control> {
    match normalize_term(text) {
        None => records.to_vec(),
        Some(term) => records
            .iter()
            .filter(|control| matches_text(control, &term, TextScope::Broad))
            .cloned()
            .collect(),
    }
}
