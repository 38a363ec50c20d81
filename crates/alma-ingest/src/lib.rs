//! ALMA relationship data ingestion.
//!
//! Loads the child/parent relationship table (a CSV or TSV export of the
//! `CHILD PARENT ALMA` spreadsheet) into validated records, and reads the
//! plain-text ID lists used for membership checks.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use alma_ingest::{TableOptions, load_index};
//!
//! let (index, report) = load_index(Path::new("CHILD PARENT ALMA.csv"), &TableOptions::default())?;
//! println!("{} records, {} rows skipped", report.records, report.skipped());
//! let result = index.lookup("990000907150205000");
//! ```

mod error;
mod list;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Relationship Table ===
pub use table::{
    ColumnLayout, DEFAULT_CHILD_COLUMN, DEFAULT_PARENT_COLUMN, LoadReport, LoadedTable,
    TableOptions, load_index, read_relationship_records, read_relationship_table,
};

// === ID Lists ===
pub use list::{ListParseMode, parse_id_list, read_id_file, read_id_list};
