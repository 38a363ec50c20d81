//! Delimited-text reading of the relationship table.

use std::io::Read;
use std::path::Path;

use alma_model::{IdPolicy, RelationshipIndex, RelationshipRecord, split_parent_field};
use csv::ReaderBuilder;
use serde::Serialize;

use crate::error::{IngestError, Result};

use super::header::{ColumnLayout, DEFAULT_CHILD_COLUMN, DEFAULT_PARENT_COLUMN, normalize_header};

/// Options controlling how the relationship table is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Name of the child ID column.
    pub child_column: String,
    /// Name of the parent IDs column.
    pub parent_column: String,
    /// Field delimiter. When unset it is chosen from the file extension.
    pub delimiter: Option<u8>,
    /// How cell values become IDs.
    pub id_policy: IdPolicy,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            child_column: DEFAULT_CHILD_COLUMN.to_string(),
            parent_column: DEFAULT_PARENT_COLUMN.to_string(),
            delimiter: None,
            id_policy: IdPolicy::default(),
        }
    }
}

impl TableOptions {
    /// Set the required column names.
    #[must_use]
    pub fn with_columns(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.child_column = child.into();
        self.parent_column = parent.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Delimiter for `path`: explicit setting, else tab for `.tsv`/`.tab`, else comma.
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        if let Some(delimiter) = self.delimiter {
            return delimiter;
        }
        let is_tab_separated = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab"))
            .unwrap_or(false);
        if is_tab_separated { b'\t' } else { b',' }
    }
}

/// Row counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows read (header excluded).
    pub rows_read: usize,
    /// Rows that became records.
    pub records: usize,
    /// Rows skipped because the child cell was blank.
    pub skipped_empty_child: usize,
    /// Rows skipped because the parent cell held no IDs.
    pub skipped_empty_parent: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_empty_child + self.skipped_empty_parent
    }
}

/// Records read from a relationship table, in source row order.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub records: Vec<RelationshipRecord>,
    pub report: LoadReport,
}

/// Reads the relationship table at `path`.
///
/// Fails with [`IngestError::SourceUnreadable`] when the file cannot be read
/// or is not delimited text, and with [`IngestError::Schema`] when a required
/// column is missing.
pub fn read_relationship_table(path: &Path, options: &TableOptions) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::unreadable(path, e))?;
    check_source_bytes(&bytes, path)?;
    read_relationship_records(bytes.as_slice(), path, options)
}

/// Reads relationship records from any reader. `source` is used for the
/// delimiter choice and in error messages.
pub fn read_relationship_records<R: Read>(
    reader: R,
    source: &Path,
    options: &TableOptions,
) -> Result<LoadedTable> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter_for(source))
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| IngestError::unreadable(source, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::unreadable(source, "no header row"));
    }

    let layout = ColumnLayout::resolve(
        &headers,
        &options.child_column,
        &options.parent_column,
        source,
    )?;
    tracing::debug!(
        child_col = %headers[layout.child],
        parent_col = %headers[layout.parent],
        "Resolved relationship columns"
    );

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (row_idx, row_result) in csv_reader.records().enumerate() {
        let row = row_result.map_err(|e| IngestError::unreadable(source, e))?;
        report.rows_read += 1;
        // Header is line 1.
        let line = row_idx + 2;

        let child = options
            .id_policy
            .normalize(row.get(layout.child).unwrap_or_default());
        if child.is_empty() {
            report.skipped_empty_child += 1;
            tracing::debug!(line, "Skipping row with empty child ID");
            continue;
        }

        let parent_cell = row.get(layout.parent).unwrap_or_default();
        let parents = split_parent_field(parent_cell, options.id_policy);
        match RelationshipRecord::new(child, parents) {
            Some(record) => records.push(record),
            None => {
                report.skipped_empty_parent += 1;
                tracing::debug!(line, "Skipping row with no parent IDs");
            }
        }
    }
    report.records = records.len();

    Ok(LoadedTable {
        records,
        report,
    })
}

/// Reads the table at `path` and builds its index.
///
/// Nothing is returned on error, so callers never see a partial index.
pub fn load_index(path: &Path, options: &TableOptions) -> Result<(RelationshipIndex, LoadReport)> {
    let table = read_relationship_table(path, options)?;
    let index = RelationshipIndex::from_records(&table.records);
    let stats = index.stats();
    tracing::info!(
        path = %path.display(),
        rows = table.report.rows_read,
        records = table.report.records,
        skipped = table.report.skipped(),
        children = stats.children,
        parents = stats.parents,
        "Loaded relationship table"
    );
    if table.report.skipped() > 0 {
        tracing::debug!(
            empty_child = table.report.skipped_empty_child,
            empty_parent = table.report.skipped_empty_parent,
            "Skipped incomplete rows"
        );
    }
    Ok((index, table.report))
}

/// Rejects inputs that are clearly not UTF-8 delimited text.
fn check_source_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.is_empty() {
        return Err(IngestError::unreadable(path, "file is empty"));
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::unreadable(path, "UTF-16 LE encoding is not supported"));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::unreadable(path, "UTF-16 BE encoding is not supported"));
    }
    if bytes.starts_with(b"PK\x03\x04") {
        return Err(IngestError::unreadable(
            path,
            "file is a spreadsheet workbook; export it as CSV first",
        ));
    }
    Ok(())
}
