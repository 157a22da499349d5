//! Catalog record types shared across Controlscope.
//!
//! A [`Control`] is one security/privacy requirement from the NIST SP 800-53
//! catalog. Optional attributes are modelled as `Option` so every consumer
//! has to decide what "absent" means instead of probing for properties.

use crate::error::ControlscopeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Newtype for control identifiers (e.g. `AC-2`).
///
/// The identifier is the stable key of a record within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(String);

impl ControlId {
    /// Create a new `ControlId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ControlId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Implementation priority assigned to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Highest priority, implement first
    P1,
    /// Second priority
    P2,
    /// Third priority
    P3,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Self; 3] = [Self::P1, Self::P2, Self::P3];

    /// Get the canonical label (`P1`, `P2`, `P3`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ControlscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlscopeError::Validation(format!("unknown priority '{s}'")))
    }
}

/// Baseline impact level a control applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    /// Low-impact baseline
    Low,
    /// Moderate-impact baseline
    Moderate,
    /// High-impact baseline
    High,
}

impl ImpactLevel {
    /// All impact levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    /// Get the canonical label (`Low`, `Moderate`, `High`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactLevel {
    type Err = ControlscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlscopeError::Validation(format!("unknown baseline '{s}'")))
    }
}

/// A refinement attached to a parent control (e.g. `AC-2(1)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    /// Enhancement identifier, conventionally prefixed by the parent id
    pub id: String,
    /// Short enhancement name
    pub title: String,
}

impl Enhancement {
    /// Create a new enhancement.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single catalog record.
///
/// Field order is the serialization order used by the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Unique identifier (e.g. `AC-2`)
    pub id: ControlId,

    /// Short control name
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Family (category) the control belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub family: String,

    /// Implementation priority, if assigned
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Baselines the control is part of
    #[serde(default, deserialize_with = "null_as_default")]
    pub baseline: Vec<ImpactLevel>,

    /// Short summary
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Full normative text
    #[serde(default)]
    pub control_text: Option<String>,

    /// Discussion / supplemental guidance
    #[serde(default)]
    pub supplemental_guidance: Option<String>,

    /// Enhancements refining this control
    #[serde(default, deserialize_with = "null_as_default")]
    pub control_enhancements: Vec<Enhancement>,
}

impl Control {
    /// Create a control with the required attributes and no optional ones.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        family: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ControlId::new(id),
            title: title.into(),
            family: family.into(),
            priority: None,
            baseline: Vec::new(),
            description: description.into(),
            control_text: None,
            supplemental_guidance: None,
            control_enhancements: Vec::new(),
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the baselines.
    #[must_use]
    pub fn with_baseline(mut self, baseline: impl IntoIterator<Item = ImpactLevel>) -> Self {
        self.baseline = baseline.into_iter().collect();
        self
    }

    /// Set the full control text.
    #[must_use]
    pub fn with_control_text(mut self, text: impl Into<String>) -> Self {
        self.control_text = Some(text.into());
        self
    }

    /// Set the supplemental guidance.
    #[must_use]
    pub fn with_supplemental_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.supplemental_guidance = Some(guidance.into());
        self
    }

    /// Append an enhancement.
    #[must_use]
    pub fn with_enhancement(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.control_enhancements.push(Enhancement::new(id, title));
        self
    }

    /// Whether the control belongs to the given baseline.
    #[must_use]
    pub fn has_baseline(&self, level: ImpactLevel) -> bool {
        self.baseline.contains(&level)
    }

    /// Number of enhancements attached to the control.
    #[must_use]
    pub fn enhancement_count(&self) -> usize {
        self.control_enhancements.len()
    }

    /// Check the record invariants.
    ///
    /// Violations are reported rather than rejected; the catalog tolerates
    /// malformed records and treats their missing attributes as non-matching.
    #[must_use]
    pub fn validate(&self) -> Vec<RecordIssue> {
        let mut issues = Vec::new();

        if self.id.as_str().trim().is_empty() {
            issues.push(RecordIssue::EmptyId);
        }

        if self.family.trim().is_empty() {
            issues.push(RecordIssue::EmptyFamily);
        }

        for enhancement in &self.control_enhancements {
            if !enhancement.id.starts_with(self.id.as_str()) {
                issues.push(RecordIssue::UnprefixedEnhancement {
                    enhancement_id: enhancement.id.clone(),
                });
            }
        }

        issues
    }
}

/// Invariant violation found on a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// The record has an empty identifier
    EmptyId,
    /// The record has no family
    EmptyFamily,
    /// An enhancement id does not start with the parent control id
    UnprefixedEnhancement {
        /// The offending enhancement id
        enhancement_id: String,
    },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => f.write_str("control id is empty"),
            Self::EmptyFamily => f.write_str("control family is empty"),
            Self::UnprefixedEnhancement { enhancement_id } => {
                write!(f, "enhancement {enhancement_id} is not prefixed by its parent id")
            }
        }
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
        .with_baseline([ImpactLevel::Low, ImpactLevel::Moderate, ImpactLevel::High])
        .with_enhancement("AC-2(1)", "Automated System Account Management")
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("p2".parse::<Priority>().expect("parse p2"), Priority::P2);
        assert_eq!(" P3 ".parse::<Priority>().expect("parse P3"), Priority::P3);
        assert!("P4".parse::<Priority>().is_err());
    }

    #[test]
    fn test_impact_level_parse_and_display() {
        let level: ImpactLevel = "HIGH".parse().expect("parse HIGH");
        assert_eq!(level, ImpactLevel::High);
        assert_eq!(level.to_string(), "High");
        assert!("Critical".parse::<ImpactLevel>().is_err());
    }

    #[test]
    fn test_control_serialization_field_order() {
        let json = serde_json::to_string(&account_management()).expect("serialize control");
        let positions: Vec<usize> = [
            "\"id\"",
            "\"title\"",
            "\"family\"",
            "\"priority\"",
            "\"baseline\"",
            "\"description\"",
            "\"control_text\"",
            "\"supplemental_guidance\"",
            "\"control_enhancements\"",
        ]
        .iter()
        .map(|key| json.find(key).expect("key present"))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"control_text\":null"));
    }

    #[test]
    fn test_control_deserialize_tolerates_missing_fields() {
        let control: Control =
            serde_json::from_str(r#"{"id": "XX-1", "title": "Orphan"}"#).expect("parse control");

        assert_eq!(control.id.as_str(), "XX-1");
        assert!(control.family.is_empty());
        assert!(control.priority.is_none());
        assert!(control.baseline.is_empty());
        assert!(control.control_enhancements.is_empty());
    }

    #[test]
    fn test_control_deserialize_treats_null_as_missing() {
        let control: Control = serde_json::from_str(
            r#"{"id": "XX-2", "title": null, "family": null, "description": null,
                "baseline": null, "control_enhancements": null, "priority": null}"#,
        )
        .expect("parse control");

        assert!(control.title.is_empty());
        assert!(control.family.is_empty());
        assert!(control.description.is_empty());
        assert!(control.baseline.is_empty());
        assert!(control.control_enhancements.is_empty());
    }

    #[test]
    fn test_control_deserialize_rejects_unknown_baseline() {
        let result: std::result::Result<Control, _> =
            serde_json::from_str(r#"{"id": "XX-1", "baseline": ["Severe"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_clean_record() {
        assert!(account_management().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let control = Control::new("AC-3", "Access Enforcement", "", "Enforce access.")
            .with_enhancement("AC-2(1)", "Misfiled");

        let issues = control.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&RecordIssue::EmptyFamily));
        assert!(issues.contains(&RecordIssue::UnprefixedEnhancement {
            enhancement_id: "AC-2(1)".to_string()
        }));
    }

    #[test]
    fn test_helpers() {
        let control = account_management();
        assert!(control.has_baseline(ImpactLevel::Moderate));
        assert_eq!(control.enhancement_count(), 1);
        assert_eq!(control.id.to_string(), "AC-2");
    }
}
