//! Per-state data carried by a map.

use serde::{Deserialize, Serialize};

/// One state's entry in a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    /// Two-letter postal code.
    pub state_code: String,
    /// Display name derived from the code.
    #[serde(default)]
    pub state_name: String,
    /// Numeric value driving the fill color; `None` when missing.
    #[serde(default)]
    pub value: Option<f64>,
    /// Free text shown in the tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Text drawn on the state instead of its code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Explicit color from the color column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StateRecord {
    pub fn new(state_code: impl Into<String>, state_name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            state_code: state_code.into(),
            state_name: state_name.into(),
            value,
            info: None,
            label: None,
            color: None,
        }
    }
}

/// First record for `code`; later duplicates are ignored by consumers.
pub fn find_record<'a>(records: &'a [StateRecord], code: &str) -> Option<&'a StateRecord> {
    records.iter().find(|r| r.state_code == code)
}
