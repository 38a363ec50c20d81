//! Named ID lists (e.g. the GENIZA or MANUSCRIPTS collections).

use std::collections::HashSet;

use serde::Serialize;

/// A named set of IDs used for membership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    name: String,
    ids: HashSet<String>,
}

/// IDs of a batch split by membership of one list, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub list: String,
    pub members: Vec<String>,
    pub non_members: Vec<String>,
}

impl IdList {
    pub fn new<I, S>(name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn partition<S: AsRef<str>>(&self, ids: &[S]) -> Membership {
        let (members, non_members) = ids
            .iter()
            .map(|id| id.as_ref().to_string())
            .partition(|id| self.contains(id));
        Membership {
            list: self.name.clone(),
            members,
            non_members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_exact() {
        let list = IdList::new("GENIZA", ["990001", "990002"]);
        assert_eq!(list.name(), "GENIZA");
        assert_eq!(list.len(), 2);
        assert!(list.contains("990001"));
        assert!(!list.contains(" 990001"));
    }

    #[test]
    fn test_partition_keeps_order() {
        let list = IdList::new("GENIZA", ["b", "d"]);
        let split = list.partition(&["a", "b", "c", "d"]);
        assert_eq!(split.list, "GENIZA");
        assert_eq!(split.members, vec!["b", "d"]);
        assert_eq!(split.non_members, vec!["a", "c"]);
    }
}
