//! Hierarchy roles and batch classification.

use std::fmt;

use serde::Serialize;

use crate::index::RelationshipIndex;

/// Where an ID sits in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
    Both,
    Neither,
}

impl Role {
    pub fn from_flags(is_child: bool, is_parent: bool) -> Self {
        match (is_child, is_parent) {
            (true, true) => Self::Both,
            (true, false) => Self::Child,
            (false, true) => Self::Parent,
            (false, false) => Self::Neither,
        }
    }

    pub fn is_child(self) -> bool {
        matches!(self, Self::Child | Self::Both)
    }

    pub fn is_parent(self) -> bool {
        matches!(self, Self::Parent | Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Child => "Child",
            Self::Both => "Both",
            Self::Neither => "Neither",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch of IDs split by role, each bucket in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub parents_only: Vec<String>,
    pub children_and_parents: Vec<String>,
    pub children_only: Vec<String>,
    /// IDs found in neither column.
    pub unmatched: Vec<String>,
    /// IDs with children and no parents of their own.
    pub top_level_parents: Vec<String>,
    /// IDs with neither parents nor children.
    pub standalone: Vec<String>,
}

impl Classification {
    /// Submitted IDs that appear as a child: children only first, then
    /// those that are also parents.
    pub fn submitted_children(&self) -> impl Iterator<Item = &String> {
        self.children_only
            .iter()
            .chain(self.children_and_parents.iter())
    }
}

/// Classify each ID by its role in `index`.
pub fn classify<S: AsRef<str>>(index: &RelationshipIndex, ids: &[S]) -> Classification {
    let mut classification = Classification::default();
    for id in ids {
        let id = id.as_ref();
        let role = index.role_of(id);
        let bucket = match role {
            Role::Parent => &mut classification.parents_only,
            Role::Both => &mut classification.children_and_parents,
            Role::Child => &mut classification.children_only,
            Role::Neither => &mut classification.unmatched,
        };
        bucket.push(id.to_string());
        if !role.is_child() {
            let group = if role.is_parent() {
                &mut classification.top_level_parents
            } else {
                &mut classification.standalone
            };
            group.push(id.to_string());
        }
    }
    classification
}
