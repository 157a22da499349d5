//! JSON export.

use crate::error::Result;
use controlscope_core::Control;

/// Serialize records as pretty-printed JSON (2-space indent).
///
/// Fields appear in declaration order; absent optional fields are written
/// as `null`.
pub fn to_json(records: &[Control]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
