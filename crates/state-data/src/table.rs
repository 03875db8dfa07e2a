//! Reading uploaded spreadsheets into header-keyed rows.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One data row: column header to cell text. Empty cells are absent.
pub type Row = HashMap<String, String>;

/// Spreadsheet formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
}

impl FileKind {
    /// Pick a parser from the uploaded file name's extension.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileKind::Excel),
            "" => Err(IngestError::UnsupportedFileType(name.to_string())),
            other => Err(IngestError::UnsupportedFileType(format!(".{}", other))),
        }
    }
}

/// A parsed sheet: ordered headers plus data rows in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from already-split rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Parse uploaded bytes according to `kind`.
    pub fn parse(kind: FileKind, bytes: &[u8]) -> Result<Self> {
        match kind {
            FileKind::Csv => Self::from_csv(bytes),
            FileKind::Excel => Self::from_excel(bytes),
        }
    }

    /// Parse CSV with a header record.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let cells = record.iter().map(str::to_string);
            if let Some(row) = build_row(&headers, cells) {
                rows.push(row);
            }
        }

        debug!(columns = headers.len(), rows = rows.len(), "Parsed CSV upload");
        Ok(Self::new(non_empty_headers(headers), rows))
    }

    /// Parse the first worksheet of an Excel/ODS workbook.
    ///
    /// The first row containing any value is the header row.
    pub fn from_excel(bytes: &[u8]) -> Result<Self> {
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(IngestError::NoRows)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut lines = range
            .rows()
            .map(|cells| cells.iter().map(cell_text).collect::<Vec<_>>())
            .skip_while(|cells| cells.iter().all(|c| c.trim().is_empty()));

        let headers: Vec<String> = match lines.next() {
            Some(cells) => cells.into_iter().map(|c| c.trim().to_string()).collect(),
            None => return Err(IngestError::NoRows),
        };

        let rows: Vec<Row> = lines
            .filter_map(|cells| build_row(&headers, cells.into_iter()))
            .collect();

        debug!(
            sheet = %sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "Parsed Excel upload"
        );
        Ok(Self::new(non_empty_headers(headers), rows))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn non_empty_headers(headers: Vec<String>) -> Vec<String> {
    headers.into_iter().filter(|h| !h.is_empty()).collect()
}

/// Zip cells with headers. Returns `None` for rows with no text at all.
fn build_row(headers: &[String], cells: impl Iterator<Item = String>) -> Option<Row> {
    let mut row = Row::new();
    for (header, cell) in headers.iter().zip(cells) {
        if header.is_empty() || cell.is_empty() || row.contains_key(header) {
            continue;
        }
        row.insert(header.clone(), cell);
    }

    if row.values().all(|v| v.trim().is_empty()) {
        None
    } else {
        Some(row)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_name() {
        assert_eq!(FileKind::from_file_name("data.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_file_name("DATA.XLSX").unwrap(), FileKind::Excel);
        assert_eq!(FileKind::from_file_name("old.xls").unwrap(), FileKind::Excel);
        assert!(matches!(
            FileKind::from_file_name("notes.txt"),
            Err(IngestError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            FileKind::from_file_name("noextension"),
            Err(IngestError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_csv_basic() {
        let csv = "State,Value\nNew York,75\nCalifornia,50\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["State", "Value"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["State"], "New York");
        assert_eq!(table.rows[1]["Value"], "50");
    }

    #[test]
    fn test_csv_bom_quotes_and_ragged_rows() {
        let csv = "\u{feff}State , Notes,Value\n\"Texas\",\"Big, hot\",25\nOhio\n\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["State", "Notes", "Value"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Notes"], "Big, hot");
        assert_eq!(table.rows[1].get("Value"), None);
    }

    #[test]
    fn test_csv_skips_blank_rows() {
        let csv = "State,Value\n,\nUtah,3\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0]["State"], "Utah");
    }

    #[test]
    fn test_csv_header_only() {
        let table = Table::from_csv(b"State,Value\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 2);
    }

    #[test]
    fn test_excel_first_sheet() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "State").unwrap();
        sheet.write_string(0, 1, "Amount").unwrap();
        sheet.write_string(1, 0, "Ohio").unwrap();
        sheet.write_number(1, 1, 42).unwrap();
        sheet.write_string(2, 0, "Iowa").unwrap();
        sheet.write_number(2, 1, 2.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = Table::parse(FileKind::Excel, &bytes).unwrap();
        assert_eq!(table.headers, vec!["State", "Amount"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Amount"], "42");
        assert_eq!(table.rows[1]["Amount"], "2.5");
    }

    #[test]
    fn test_excel_garbage_is_error() {
        assert!(matches!(
            Table::from_excel(b"definitely not a workbook"),
            Err(IngestError::Excel(_))
        ));
    }
}
