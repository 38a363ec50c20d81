//! Relationship table loading.

mod header;
mod reader;

pub use header::{ColumnLayout, DEFAULT_CHILD_COLUMN, DEFAULT_PARENT_COLUMN};
pub use reader::{
    LoadReport, LoadedTable, TableOptions, load_index, read_relationship_records,
    read_relationship_table,
};
