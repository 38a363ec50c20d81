use serde::Serialize;

use crate::ids::{IdPolicy, split_parent_field};

/// One validated row of the relationship table.
///
/// `child_id` is never empty and `parent_ids` always holds at least one ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipRecord {
    child_id: String,
    parent_ids: Vec<String>,
}

impl RelationshipRecord {
    /// Build a record, returning `None` when the invariants do not hold.
    pub fn new(child_id: impl Into<String>, parent_ids: Vec<String>) -> Option<Self> {
        let child_id = child_id.into();
        if child_id.is_empty() || parent_ids.is_empty() || parent_ids.iter().any(String::is_empty)
        {
            return None;
        }
        Some(Self {
            child_id,
            parent_ids,
        })
    }

    /// Build a record from the raw `CHILD` and `PARENT` cells of a row.
    pub fn from_cells(child: &str, parent: &str, policy: IdPolicy) -> Option<Self> {
        Self::new(
            policy.normalize(child),
            split_parent_field(parent, policy),
        )
    }

    pub fn child_id(&self) -> &str {
        &self.child_id
    }

    /// Parent IDs in the order they appeared in the cell.
    pub fn parent_ids(&self) -> &[String] {
        &self.parent_ids
    }
}
