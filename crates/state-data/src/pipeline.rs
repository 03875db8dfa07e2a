//! Turning a parsed sheet into validated state records.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::color::normalize_color;
use crate::columns::{detect_columns, ColumnRoles};
use crate::error::{IngestError, Result};
use crate::record::StateRecord;
use crate::states::normalize_state;
use crate::table::{FileKind, Row, Table};

/// Result of a successful ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutput {
    /// Records in source order. Duplicate states are kept.
    pub state_data: Vec<StateRecord>,
    /// Valid colors from the color column, keyed by state code. A later row
    /// for the same state replaces an earlier one.
    pub custom_colors: BTreeMap<String, String>,
    /// Columns used for each role.
    pub columns: ColumnRoles,
}

impl IngestOutput {
    /// User-facing success message.
    pub fn summary_message(&self) -> String {
        let mut message = format!(
            "Successfully loaded data for {} states",
            self.state_data.len()
        );
        if !self.custom_colors.is_empty() {
            message.push_str(&format!(". Found {} custom colors.", self.custom_colors.len()));
        }
        message
    }
}

/// Parse an uploaded file and normalize it.
pub fn ingest_file(file_name: &str, bytes: &[u8]) -> Result<IngestOutput> {
    let kind = FileKind::from_file_name(file_name)?;
    let table = Table::parse(kind, bytes)?;
    ingest(&table)
}

/// Normalize a parsed table into state records.
///
/// Rows whose state cell does not resolve to one of the 51 postal codes are
/// dropped. A missing or unparseable value keeps the row with `value: None`.
pub fn ingest(table: &Table) -> Result<IngestOutput> {
    if table.is_empty() {
        return Err(IngestError::NoRows);
    }

    let columns = detect_columns(&table.headers)?;
    debug!(?columns, "Detected columns");

    let mut state_data = Vec::with_capacity(table.rows.len());
    let mut custom_colors = BTreeMap::new();

    for row in &table.rows {
        let Some(record) = normalize_row(row, &columns) else {
            continue;
        };
        if let Some(color) = &record.color {
            custom_colors.insert(record.state_code.clone(), color.clone());
        }
        state_data.push(record);
    }

    let dropped = table.rows.len() - state_data.len();
    if state_data.is_empty() {
        info!(rows = table.rows.len(), "No rows survived normalization");
        return Err(IngestError::NoValidRows);
    }

    info!(
        records = state_data.len(),
        dropped,
        custom_colors = custom_colors.len(),
        "Ingested state data"
    );

    Ok(IngestOutput {
        state_data,
        custom_colors,
        columns,
    })
}

fn normalize_row(row: &Row, columns: &ColumnRoles) -> Option<StateRecord> {
    let state = normalize_state(row.get(&columns.state)?)?;

    let value = row.get(&columns.value).and_then(|v| parse_value(v));
    let info = optional_text(row, columns.info.as_deref());
    let label = optional_text(row, columns.label.as_deref());
    let color = columns
        .color
        .as_deref()
        .and_then(|c| row.get(c))
        .and_then(|c| normalize_color(c));

    Some(StateRecord {
        state_code: state.code.to_string(),
        state_name: state.name.to_string(),
        value,
        info,
        label,
        color,
    })
}

fn optional_text(row: &Row, column: Option<&str>) -> Option<String> {
    column
        .and_then(|c| row.get(c))
        .filter(|text| !text.is_empty())
        .cloned()
}

/// Parse a value cell. Thousands separators and a trailing `%` are ignored.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|cells| {
                    cells
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_drops_unknown_state() {
        let t = table(
            &["State", "Value"],
            &[
                &[("State", "New York"), ("Value", "75")],
                &[("State", "ZZ"), ("Value", "10")],
            ],
        );
        let out = ingest(&t).unwrap();
        assert_eq!(out.state_data, vec![StateRecord::new("NY", "New York", Some(75.0))]);
        assert!(out.custom_colors.is_empty());
    }

    #[test]
    fn test_keeps_rows_with_missing_value() {
        let t = table(
            &["State", "Value"],
            &[
                &[("State", "CA"), ("Value", "n/a")],
                &[("State", "TX")],
                &[("State", "OH"), ("Value", "1,250.5")],
            ],
        );
        let out = ingest(&t).unwrap();
        assert_eq!(out.state_data.len(), 3);
        assert_eq!(out.state_data[0].value, None);
        assert_eq!(out.state_data[1].value, None);
        assert_eq!(out.state_data[2].value, Some(1250.5));
    }

    #[test]
    fn test_color_column_populates_overrides() {
        let t = table(
            &["State", "Value", "Color"],
            &[
                &[("State", "Texas"), ("Value", "3"), ("Color", "ff0000")],
                &[("State", "Ohio"), ("Value", "4"), ("Color", "sparkly")],
            ],
        );
        let out = ingest(&t).unwrap();
        assert_eq!(out.custom_colors.get("TX").map(String::as_str), Some("#ff0000"));
        assert_eq!(out.state_data[0].color.as_deref(), Some("#ff0000"));
        assert!(!out.custom_colors.contains_key("OH"));
        assert_eq!(out.state_data[1].color, None);
        assert_eq!(
            out.summary_message(),
            "Successfully loaded data for 2 states. Found 1 custom colors."
        );
    }

    #[test]
    fn test_info_and_label_copied_verbatim() {
        let t = table(
            &["State", "Value", "Details", "Title"],
            &[&[
                ("State", "ME"),
                ("Value", "9"),
                ("Details", "  Lobster  "),
                ("Title", "Pine Tree"),
            ]],
        );
        let out = ingest(&t).unwrap();
        let record = &out.state_data[0];
        assert_eq!(record.info.as_deref(), Some("  Lobster  "));
        assert_eq!(record.label.as_deref(), Some("Pine Tree"));
        assert_eq!(out.columns.info.as_deref(), Some("Details"));
    }

    #[test]
    fn test_duplicates_kept_in_order_last_color_wins() {
        let t = table(
            &["State", "Value", "Fill"],
            &[
                &[("State", "UT"), ("Value", "1"), ("Fill", "red")],
                &[("State", "Utah"), ("Value", "2"), ("Fill", "blue")],
            ],
        );
        let out = ingest(&t).unwrap();
        assert_eq!(out.state_data.len(), 2);
        assert_eq!(out.state_data[0].value, Some(1.0));
        assert_eq!(out.custom_colors["UT"], "blue");
    }

    #[test]
    fn test_failure_signals() {
        let empty = table(&["State", "Value"], &[]);
        assert!(matches!(ingest(&empty), Err(IngestError::NoRows)));

        let one_column = table(&["State"], &[&[("State", "NY")]]);
        assert!(matches!(ingest(&one_column), Err(IngestError::ColumnDetection)));

        let all_bad = table(&["State", "Value"], &[&[("State", "Narnia"), ("Value", "1")]]);
        assert!(matches!(ingest(&all_bad), Err(IngestError::NoValidRows)));
    }

    #[test]
    fn test_ingest_csv_file() {
        let csv = "st,amount,notes\nny,10,Empire\nfl,,Sunshine\nxx,5,\n";
        let out = ingest_file("upload.CSV", csv.as_bytes()).unwrap();
        assert_eq!(out.state_data.len(), 2);
        assert_eq!(out.state_data[1].state_name, "Florida");
        assert_eq!(out.state_data[1].value, None);
        assert_eq!(out.summary_message(), "Successfully loaded data for 2 states");
    }

    #[test]
    fn test_numeric_first_column_is_not_a_state_column() {
        let csv = "Rank,Score\n1,10\n2,20\n4,30\n36,40\n";
        assert!(matches!(
            ingest_file("ranks.csv", csv.as_bytes()),
            Err(IngestError::NoValidRows)
        ));
    }

    #[test]
    fn test_ingest_rejects_unknown_extension() {
        assert!(matches!(
            ingest_file("map.json", b"{}"),
            Err(IngestError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Some(42.0));
        assert_eq!(parse_value(" -3.5 "), Some(-3.5));
        assert_eq!(parse_value("12%"), Some(12.0));
        assert_eq!(parse_value("1e3"), Some(1000.0));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("NaN"), None);
    }
}
