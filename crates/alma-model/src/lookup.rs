//! Bidirectional lookup over a [`RelationshipIndex`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::index::RelationshipIndex;
use crate::role::Role;

/// Outcome of looking up one ID in both roles.
///
/// Both sets empty means the ID is absent from the table. That is a valid
/// result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// The query after trimming.
    pub query: String,
    /// Parents of the query when it appears as a child.
    pub as_child_parents: BTreeSet<String>,
    /// Children of the query when it appears as a parent.
    pub as_parent_children: BTreeSet<String>,
}

impl LookupResult {
    pub fn is_not_found(&self) -> bool {
        self.as_child_parents.is_empty() && self.as_parent_children.is_empty()
    }

    pub fn role(&self) -> Role {
        Role::from_flags(
            !self.as_child_parents.is_empty(),
            !self.as_parent_children.is_empty(),
        )
    }
}

/// Look up `query` as a child and as a parent.
///
/// The query is trimmed, then matched exactly (case-sensitive). The index is
/// never modified.
pub fn lookup(index: &RelationshipIndex, query: &str) -> LookupResult {
    let query = query.trim();
    LookupResult {
        query: query.to_string(),
        as_child_parents: index.parents_of(query).cloned().unwrap_or_default(),
        as_parent_children: index.children_of(query).cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdPolicy;
    use crate::record::RelationshipRecord;

    fn index(rows: &[(&str, &str)]) -> RelationshipIndex {
        let records: Vec<_> = rows
            .iter()
            .filter_map(|(child, parent)| {
                RelationshipRecord::from_cells(child, parent, IdPolicy::Exact)
            })
            .collect();
        RelationshipIndex::from_records(&records)
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_child_query_returns_parents() {
        let index = index(&[("1001", "2002|||2003")]);
        let result = lookup(&index, "1001");
        assert_eq!(result.as_child_parents, set(&["2002", "2003"]));
        assert!(result.as_parent_children.is_empty());
        assert_eq!(result.role(), Role::Child);
    }

    #[test]
    fn test_parent_query_returns_children() {
        let index = index(&[("1001", "2002|||2003")]);
        let result = lookup(&index, "2002");
        assert!(result.as_child_parents.is_empty());
        assert_eq!(result.as_parent_children, set(&["1001"]));
        assert_eq!(result.role(), Role::Parent);
    }

    #[test]
    fn test_absent_query_is_empty_not_error() {
        let index = index(&[("1001", "2002|||2003")]);
        let result = lookup(&index, "9999");
        assert!(result.is_not_found());
        assert_eq!(result.role(), Role::Neither);
        assert_eq!(result.query, "9999");
    }

    #[test]
    fn test_both_roles_exposed_together() {
        let index = index(&[("B", "A"), ("C", "B")]);
        let result = lookup(&index, "B");
        assert_eq!(result.as_child_parents, set(&["A"]));
        assert_eq!(result.as_parent_children, set(&["C"]));
        assert_eq!(result.role(), Role::Both);
    }

    #[test]
    fn test_query_is_trimmed_but_case_sensitive() {
        let index = index(&[("abc", "XYZ")]);
        assert_eq!(lookup(&index, "  abc\t").as_child_parents, set(&["XYZ"]));
        assert!(lookup(&index, "ABC").is_not_found());
        assert!(lookup(&index, "xyz").is_not_found());
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let index = index(&[("1", "2|||3"), ("4", "2")]);
        assert_eq!(lookup(&index, "2"), lookup(&index, "2"));
    }

    #[test]
    fn test_serializes_as_sorted_arrays() {
        let index = index(&[("1", "3|||2")]);
        let json = serde_json::to_value(lookup(&index, "1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "1",
                "as_child_parents": ["2", "3"],
                "as_parent_children": [],
            })
        );
    }
}
