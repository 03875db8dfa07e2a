//! Input validation for map ids and submitted configurations.

use std::fmt;

use state_data::states;

use crate::error::StoreError;
use crate::models::NewMap;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A state code outside the 50 states plus DC.
    UnknownState { field: String, code: String },
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Too many entries in a list.
    TooMany { field: String, max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownState { field, code } => {
                write!(f, "{} contains unknown state code '{}'", field, code)
            }
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::TooMany { field, max, actual } => {
                write!(f, "{} has too many entries ({}, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum length of a map id.
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum length of titles and legend labels.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of per-state info, label and color text.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Maximum number of state records in one map.
pub const MAX_STATE_RECORDS: usize = 1000;

/// Check that an id only uses `[A-Za-z0-9-]`.
///
/// This runs before any lookup so a bad id never reaches a backend (and never
/// becomes part of a file path).
pub fn validate_map_id(id: &str) -> Result<(), StoreError> {
    let ok = !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate a submitted map and fill in missing state names.
pub fn validate_new_map(map: &mut NewMap) -> Result<(), ValidationError> {
    check_length("title", &map.title, MAX_TITLE_LENGTH)?;
    check_length("legendTitle", &map.legend_title, MAX_TITLE_LENGTH)?;
    check_length("legendMinLabel", &map.legend_min_label, MAX_TITLE_LENGTH)?;
    check_length("legendMaxLabel", &map.legend_max_label, MAX_TITLE_LENGTH)?;

    if map.state_data.len() > MAX_STATE_RECORDS {
        return Err(ValidationError::TooMany {
            field: "stateData".to_string(),
            max: MAX_STATE_RECORDS,
            actual: map.state_data.len(),
        });
    }

    for record in &mut map.state_data {
        let Some(state) = states::by_code(&record.state_code) else {
            return Err(ValidationError::UnknownState {
                field: "stateData".to_string(),
                code: record.state_code.clone(),
            });
        };
        if record.state_code != state.code {
            record.state_code = state.code.to_string();
        }
        if record.state_name.trim().is_empty() {
            record.state_name = state.name.to_string();
        }

        for (field, text) in [
            ("info", &record.info),
            ("label", &record.label),
            ("color", &record.color),
        ] {
            if let Some(text) = text {
                check_length(field, text, MAX_TEXT_LENGTH)?;
            }
        }
    }

    for (code, color) in &map.custom_colors {
        if !states::is_state_code(code) {
            return Err(ValidationError::UnknownState {
                field: "customColors".to_string(),
                code: code.clone(),
            });
        }
        check_length("customColors", color, MAX_TEXT_LENGTH)?;
    }

    Ok(())
}
