//! The in-memory relationship index.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::lookup::{LookupResult, lookup};
use crate::record::RelationshipRecord;
use crate::role::Role;

/// Both directions of the child/parent relation, derived from the loaded
/// records in one pass.
///
/// The index is immutable once built. A reload builds a new index from
/// scratch; there is no incremental update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipIndex {
    parents_of: HashMap<String, BTreeSet<String>>,
    children_of: HashMap<String, BTreeSet<String>>,
    record_count: usize,
}

/// Size of an index, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub children: usize,
    pub parents: usize,
    pub edges: usize,
}

impl RelationshipIndex {
    /// Build the index from records.
    ///
    /// A child listed on several rows accumulates the union of all its
    /// parent sets.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RelationshipRecord>,
    {
        let mut index = Self::default();
        for record in records {
            index.record_count += 1;
            let child = record.child_id();
            let parents = index.parents_of.entry(child.to_string()).or_default();
            for parent in record.parent_ids() {
                parents.insert(parent.clone());
                index
                    .children_of
                    .entry(parent.clone())
                    .or_default()
                    .insert(child.to_string());
            }
        }
        index
    }

    pub fn from_records(records: &[RelationshipRecord]) -> Self {
        Self::build(records)
    }

    /// Parents recorded for `child_id`, if it appears as a child.
    pub fn parents_of(&self, child_id: &str) -> Option<&BTreeSet<String>> {
        self.parents_of.get(child_id)
    }

    /// Children recorded for `parent_id`, if it appears as a parent.
    pub fn children_of(&self, parent_id: &str) -> Option<&BTreeSet<String>> {
        self.children_of.get(parent_id)
    }

    pub fn lookup(&self, query: &str) -> LookupResult {
        lookup(self, query)
    }

    pub fn role_of(&self, id: &str) -> Role {
        let is_child = self.parents_of(id).is_some_and(|set| !set.is_empty());
        let is_parent = self.children_of(id).is_some_and(|set| !set.is_empty());
        Role::from_flags(is_child, is_parent)
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.record_count,
            children: self.parents_of.len(),
            parents: self.children_of.len(),
            edges: self.parents_of.values().map(BTreeSet::len).sum(),
        }
    }
}

impl<'a> FromIterator<&'a RelationshipRecord> for RelationshipIndex {
    fn from_iter<T: IntoIterator<Item = &'a RelationshipRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}
