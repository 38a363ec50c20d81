//! Header normalization and required-column resolution.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Default name of the child ID column.
pub const DEFAULT_CHILD_COLUMN: &str = "CHILD";
/// Default name of the delimited parent IDs column.
pub const DEFAULT_PARENT_COLUMN: &str = "PARENT";

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub child: usize,
    pub parent: usize,
}

impl ColumnLayout {
    /// Locate the child and parent columns in a normalized header row.
    ///
    /// An exact name match wins over a case-insensitive one.
    pub fn resolve(
        headers: &[String],
        child_column: &str,
        parent_column: &str,
        path: &Path,
    ) -> Result<Self> {
        let child = find_column(headers, child_column)
            .ok_or_else(|| missing_column(child_column, headers, path))?;
        let parent = find_column(headers, parent_column)
            .ok_or_else(|| missing_column(parent_column, headers, path))?;
        Ok(Self { child, parent })
    }
}

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name).or_else(|| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    })
}

fn missing_column(column: &str, headers: &[String], path: &Path) -> IngestError {
    IngestError::Schema {
        column: column.to_string(),
        path: path.to_path_buf(),
        found: headers.to_vec(),
    }
}
