//! Heuristic detection of which spreadsheet column plays which role.

use serde::Serialize;

use crate::error::{IngestError, Result};

/// A role a column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    State,
    Value,
    Info,
    Color,
    Label,
}

impl ColumnRole {
    /// Roles in the order each header is tested against them.
    pub const DETECTION_ORDER: [ColumnRole; 5] = [
        ColumnRole::State,
        ColumnRole::Value,
        ColumnRole::Info,
        ColumnRole::Color,
        ColumnRole::Label,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            ColumnRole::State => &["state", "code"],
            ColumnRole::Value => &["value", "data", "count", "amount"],
            ColumnRole::Info => &["info", "description", "notes", "details"],
            ColumnRole::Color => &["color", "colour", "fill"],
            ColumnRole::Label => &["label", "header", "title"],
        }
    }

    /// Whether a header (any case) names this role.
    pub fn matches(self, header: &str) -> bool {
        let lower = header.to_lowercase();
        if self == ColumnRole::State && lower == "st" {
            return true;
        }
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

/// Headers chosen for each role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub state: String,
    pub value: String,
    pub info: Option<String>,
    pub color: Option<String>,
    pub label: Option<String>,
}

#[derive(Default)]
struct Slots {
    state: Option<String>,
    value: Option<String>,
    info: Option<String>,
    color: Option<String>,
    label: Option<String>,
}

impl Slots {
    fn slot(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::State => &mut self.state,
            ColumnRole::Value => &mut self.value,
            ColumnRole::Info => &mut self.info,
            ColumnRole::Color => &mut self.color,
            ColumnRole::Label => &mut self.label,
        }
    }
}

/// Assign roles to headers.
///
/// Headers are visited left to right. A header is bound to the first role in
/// [`ColumnRole::DETECTION_ORDER`] it matches. If that role already has a
/// column the header is left unused; it never moves on to a later role. If no
/// state column was found the first header is used; if no value column was
/// found the second header is used.
pub fn detect_columns(headers: &[String]) -> Result<ColumnRoles> {
    if headers.len() < 2 {
        return Err(IngestError::ColumnDetection);
    }

    let mut slots = Slots::default();

    for header in headers {
        let Some(role) = ColumnRole::DETECTION_ORDER
            .into_iter()
            .find(|role| role.matches(header))
        else {
            continue;
        };
        let slot = slots.slot(role);
        if slot.is_none() {
            *slot = Some(header.clone());
        }
    }

    let state = slots.state.or_else(|| headers.first().cloned());
    let value = slots.value.or_else(|| headers.get(1).cloned());

    match (state, value) {
        (Some(state), Some(value)) => Ok(ColumnRoles {
            state,
            value,
            info: slots.info,
            color: slots.color,
            label: slots.label,
        }),
        _ => Err(IngestError::ColumnDetection),
    }
}
