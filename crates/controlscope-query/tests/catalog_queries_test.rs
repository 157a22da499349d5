//! Query scenarios against small fixtures and the embedded catalog.

use controlscope_catalog::EmbeddedCatalog;
use controlscope_core::{Control, ImpactLevel, Priority};
use controlscope_query::{filter, QueryPredicates};

fn embedded() -> Vec<Control> {
    EmbeddedCatalog::new()
        .controls()
        .expect("parse embedded catalog")
}

#[test]
fn test_family_filter_scenario() {
    let records = vec![
        Control::new("AC-1", "Policy and Procedures", "Access Control", "Policy."),
        Control::new("AC-2", "Account Management", "Access Control", "Accounts."),
        Control::new("AU-1", "Policy and Procedures", "Audit and Accountability", "Policy."),
    ];

    let view = filter(&records, &QueryPredicates::new().with_family("Access Control"));

    assert_eq!(view.len(), 2);
    assert_eq!(view[0].id.as_str(), "AC-1");
    assert_eq!(view[1].id.as_str(), "AC-2");
}

#[test]
fn test_baseline_scenario() {
    let records = vec![Control::new(
        "AC-3",
        "Access Enforcement",
        "Access Control",
        "Enforce access.",
    )
    .with_baseline([ImpactLevel::Low, ImpactLevel::High])];

    let high = QueryPredicates::new().with_baseline(ImpactLevel::High);
    let moderate = QueryPredicates::new().with_baseline(ImpactLevel::Moderate);

    assert_eq!(filter(&records, &high).len(), 1);
    assert!(filter(&records, &moderate).is_empty());
}

#[test]
fn test_text_search_on_title() {
    let records = vec![Control::new(
        "AC-3",
        "Access Enforcement",
        "Access Control",
        "Enforce approved authorizations.",
    )];

    let view = filter(&records, &QueryPredicates::new().with_text("access"));
    assert_eq!(view.len(), 1);
}

#[test]
fn test_embedded_family_filter_matches_family_exactly() {
    let records = embedded();
    let family = "Identification and Authentication";

    let view = filter(&records, &QueryPredicates::new().with_family(family));
    let expected: Vec<&Control> = records.iter().filter(|c| c.family == family).collect();

    assert!(!view.is_empty());
    assert_eq!(view.len(), expected.len());
    assert!(view.iter().all(|c| c.family == family));
}

#[test]
fn test_embedded_program_management_has_no_priority() {
    let records = embedded();
    let view = filter(
        &records,
        &QueryPredicates::new()
            .with_family("Program Management")
            .with_priority(Priority::P1),
    );
    assert!(view.is_empty());
}

#[test]
fn test_embedded_search_finds_enhancements() {
    let records = embedded();
    let view = filter(&records, &QueryPredicates::new().with_text("multi-factor"));
    let ids: Vec<&str> = view.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["IA-2"]);
}

#[test]
fn test_no_results_is_an_empty_view() {
    let records = embedded();
    let view = filter(
        &records,
        &QueryPredicates::new().with_text("quantum entanglement"),
    );
    assert!(view.is_empty());
}
