//! The active search and filter criteria.

use crate::text::{matches_text, normalize_term, TextScope};
use controlscope_core::{Control, ImpactLevel, Priority};
use serde::{Deserialize, Serialize};

/// Search and filter criteria applied to the catalog.
///
/// Every active predicate must hold for a record to be included. An empty
/// or whitespace-only `text` applies no text filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPredicates {
    /// Free-text search term
    pub text: String,
    /// Exact (case-sensitive) family name
    pub family: Option<String>,
    /// Baseline the control must be part of
    pub baseline: Option<ImpactLevel>,
    /// Priority the control must have
    pub priority: Option<Priority>,
}

impl QueryPredicates {
    /// Predicates that match every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text term.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the family filter. An empty name clears it.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.set_family(Some(family.into()));
        self
    }

    /// Set the baseline filter.
    #[must_use]
    pub fn with_baseline(mut self, baseline: ImpactLevel) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Set the priority filter.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replace the family filter. `None` or an empty name clears it.
    pub fn set_family(&mut self, family: Option<String>) {
        self.family = family.filter(|f| !f.is_empty());
    }

    /// Whether no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_family().is_none()
            && self.baseline.is_none()
            && self.priority.is_none()
            && normalize_term(&self.text).is_none()
    }

    /// The family filter, if one is active.
    #[must_use]
    pub fn active_family(&self) -> Option<&str> {
        self.family.as_deref().filter(|f| !f.is_empty())
    }

    /// Fields the text term is matched against under these predicates.
    ///
    /// A family filter narrows the text search to id, title, description and
    /// control text. Without one, every searchable field is used.
    #[must_use]
    pub fn text_scope(&self) -> TextScope {
        if self.active_family().is_some() {
            TextScope::Narrow
        } else {
            TextScope::Broad
        }
    }

    /// Whether `control` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, control: &Control) -> bool {
        self.matches_term(control, normalize_term(&self.text).as_deref())
    }

    /// Like [`QueryPredicates::matches`] with a pre-normalized text term.
    pub(crate) fn matches_term(&self, control: &Control, term: Option<&str>) -> bool {
        if let Some(family) = self.active_family() {
            if control.family != family {
                return false;
            }
        }

        if let Some(level) = self.baseline {
            if !control.has_baseline(level) {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if control.priority != Some(priority) {
                return false;
            }
        }

        term.map_or(true, |term| matches_text(control, term, self.text_scope()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_management() -> Control {
        Control::new(
            "AC-2",
            "Account Management",
            "Access Control",
            "Manage system accounts.",
        )
        .with_priority(Priority::P1)
        .with_baseline([ImpactLevel::Low, ImpactLevel::High])
    }

    #[test]
    fn test_default_is_empty() {
        assert!(QueryPredicates::new().is_empty());
        assert!(QueryPredicates::new().with_text("   ").is_empty());
        assert!(QueryPredicates::new().with_family("").is_empty());
        assert!(!QueryPredicates::new().with_text("ac").is_empty());
        assert!(!QueryPredicates::new().with_priority(Priority::P2).is_empty());
    }

    #[test]
    fn test_family_is_case_sensitive() {
        let control = account_management();
        assert!(QueryPredicates::new()
            .with_family("Access Control")
            .matches(&control));
        assert!(!QueryPredicates::new()
            .with_family("access control")
            .matches(&control));
    }

    #[test]
    fn test_baseline_membership() {
        let control = account_management();
        assert!(QueryPredicates::new()
            .with_baseline(ImpactLevel::High)
            .matches(&control));
        assert!(!QueryPredicates::new()
            .with_baseline(ImpactLevel::Moderate)
            .matches(&control));
    }

    #[test]
    fn test_priority_equality() {
        let control = account_management();
        assert!(QueryPredicates::new()
            .with_priority(Priority::P1)
            .matches(&control));
        assert!(!QueryPredicates::new()
            .with_priority(Priority::P3)
            .matches(&control));
    }

    #[test]
    fn test_missing_priority_never_matches_priority_filter() {
        let control = Control::new("PM-1", "Program Plan", "Program Management", "Plan.");
        for priority in Priority::ALL {
            assert!(!QueryPredicates::new()
                .with_priority(priority)
                .matches(&control));
        }
    }

    #[test]
    fn test_missing_family_never_matches_family_filter() {
        let control = Control::new("XX-1", "Orphan", "", "No family.");
        assert!(!QueryPredicates::new()
            .with_family("Access Control")
            .matches(&control));
        assert!(QueryPredicates::new().matches(&control));
    }

    #[test]
    fn test_text_scope_follows_family() {
        assert_eq!(QueryPredicates::new().text_scope(), TextScope::Broad);
        assert_eq!(
            QueryPredicates::new().with_family("Planning").text_scope(),
            TextScope::Narrow
        );
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let control = account_management();
        let predicates = QueryPredicates::new()
            .with_text("account")
            .with_family("Access Control")
            .with_baseline(ImpactLevel::Low)
            .with_priority(Priority::P1);
        assert!(predicates.matches(&control));

        let predicates = predicates.with_priority(Priority::P2);
        assert!(!predicates.matches(&control));
    }
}
