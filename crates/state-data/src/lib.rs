//! Spreadsheet ingestion for US state choropleth maps.
//!
//! An upload (CSV or Excel) is parsed into header-keyed rows, the state,
//! value, info, color and label columns are guessed from the headers, and
//! each row is normalized into a [`StateRecord`] keyed by postal code.
//!
//! # Example
//!
//! ```
//! use state_data::ingest_file;
//!
//! let csv = "State,Value\nNew York,75\nZZ,10\n";
//! let output = ingest_file("data.csv", csv.as_bytes()).unwrap();
//!
//! assert_eq!(output.state_data.len(), 1);
//! assert_eq!(output.state_data[0].state_code, "NY");
//! assert_eq!(output.state_data[0].value, Some(75.0));
//! ```

pub mod color;
pub mod columns;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod scheme;
pub mod states;
pub mod table;

pub use columns::{detect_columns, ColumnRole, ColumnRoles};
pub use error::{IngestError, Result};
pub use pipeline::{ingest, ingest_file, IngestOutput};
pub use record::{find_record, StateRecord};
pub use scheme::{fill_for, ColorScale, ColorScheme};
pub use states::{is_state_code, normalize_state, state_name, StateInfo, STATES};
pub use table::{FileKind, Row, Table};
