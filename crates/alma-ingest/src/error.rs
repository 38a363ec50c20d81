//! Error types for relationship data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load. Row-level anomalies never surface here; they
/// are skipped and counted in the load report instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A required column is missing from the table header.
    #[error("required column '{column}' not found in {path} (found: {})", .found.join(", "))]
    Schema {
        column: String,
        path: PathBuf,
        found: Vec<String>,
    },

    /// The source could not be opened or parsed as delimited text.
    #[error("cannot read {path}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },
}

impl IngestError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = IngestError::Schema {
            column: "PARENT".to_string(),
            path: PathBuf::from("table.csv"),
            found: vec!["CHILD".to_string(), "NOTE".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "required column 'PARENT' not found in table.csv (found: CHILD, NOTE)"
        );
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_unreadable_display() {
        let err = IngestError::unreadable("table.csv", "file is empty");
        assert_eq!(err.to_string(), "cannot read table.csv: file is empty");
        assert!(!err.is_schema_error());
    }
}
