//! Ingestion error types.

use thiserror::Error;

/// Errors that can occur while turning an uploaded sheet into state records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension is not one we can parse.
    #[error("Unsupported file format: {0}. Please upload a CSV or Excel file.")]
    UnsupportedFileType(String),

    /// CSV parsing failed.
    #[error("Error parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Excel parsing failed.
    #[error("Error parsing Excel file: {0}")]
    Excel(String),

    /// The sheet has a header row but no data rows (or nothing at all).
    #[error("No data found in the file")]
    NoRows,

    /// State and value columns could not be established.
    #[error("Could not identify state code and value columns in your data")]
    ColumnDetection,

    /// Every row was dropped during normalization.
    #[error("No valid data found in the file")]
    NoValidRows,
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        IngestError::Excel(err.to_string())
    }
}

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
