//! Parents reached from the children in a submitted batch.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::index::RelationshipIndex;
use crate::role::Classification;

/// A parent and how many submitted children point to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentCount {
    pub parent: String,
    pub children: usize,
}

/// A submitted child and its parents, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildParents {
    pub child: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParentSummary {
    /// Number of submitted IDs that appear as a child.
    pub submitted_children: usize,
    /// Distinct parents of the submitted children, ascending.
    pub unique_parents: Vec<String>,
    /// Parents by submitted-child count, highest first; ties by parent ID.
    pub ranking: Vec<ParentCount>,
    /// Submitted children with their parents, in submission order.
    pub mapping: Vec<ChildParents>,
}

/// Summarize the parents of every submitted child in `classification`.
pub fn derive_parents(
    index: &RelationshipIndex,
    classification: &Classification,
) -> ParentSummary {
    let mut summary = ParentSummary::default();
    let mut unique = BTreeSet::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for child in classification.submitted_children() {
        summary.submitted_children += 1;
        let Some(parents) = index.parents_of(child).filter(|set| !set.is_empty()) else {
            continue;
        };
        for parent in parents {
            unique.insert(parent.clone());
            *counts.entry(parent.as_str()).or_default() += 1;
        }
        summary.mapping.push(ChildParents {
            child: child.clone(),
            parents: parents.iter().cloned().collect(),
        });
    }

    summary.ranking = counts
        .into_iter()
        .map(|(parent, children)| ParentCount {
            parent: parent.to_string(),
            children,
        })
        .collect();
    // Stable sort keeps the ascending parent order among equal counts.
    summary.ranking.sort_by(|a, b| b.children.cmp(&a.children));
    summary.unique_parents = unique.into_iter().collect();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdPolicy;
    use crate::record::RelationshipRecord;
    use crate::role::classify;

    fn index(rows: &[(&str, &str)]) -> RelationshipIndex {
        let records: Vec<_> = rows
            .iter()
            .filter_map(|(c, p)| RelationshipRecord::from_cells(c, p, IdPolicy::Exact))
            .collect();
        RelationshipIndex::from_records(&records)
    }

    #[test]
    fn test_derive_parents_ranks_by_submitted_children() {
        let index = index(&[("c1", "p2|||p1"), ("c2", "p1"), ("p1", "root"), ("c3", "p3")]);
        let classification = classify(&index, &["c2", "p1", "c1", "root", "x"]);
        let summary = derive_parents(&index, &classification);

        assert_eq!(summary.submitted_children, 3);
        assert_eq!(summary.unique_parents, vec!["p1", "p2", "root"]);
        let ranking: Vec<(&str, usize)> = summary
            .ranking
            .iter()
            .map(|entry| (entry.parent.as_str(), entry.children))
            .collect();
        assert_eq!(ranking, vec![("p1", 2), ("p2", 1), ("root", 1)]);
        assert_eq!(
            summary.mapping,
            vec![
                ChildParents {
                    child: "c2".to_string(),
                    parents: vec!["p1".to_string()],
                },
                ChildParents {
                    child: "c1".to_string(),
                    parents: vec!["p1".to_string(), "p2".to_string()],
                },
                ChildParents {
                    child: "p1".to_string(),
                    parents: vec!["root".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_derive_parents_without_children() {
        let index = index(&[("c1", "p1")]);
        let summary = derive_parents(&index, &classify(&index, &["p1", "zz"]));
        assert_eq!(summary, ParentSummary::default());
    }
}
