//! Adaptive storage for a node's static children.
//!
//! A node with a handful of static children is fastest served by a linear
//! scan over an inline list; past a cutoff a hash map wins. `Branches`
//! starts in list form and is promoted to map form by the insertion that
//! finds it already holding [`BRANCH_MAP_THRESHOLD`] keys. Promotion is
//! irreversible and invisible: both forms answer `get` identically, and
//! `keys` order is simply unspecified once in map form.

use std::collections::HashMap;

use super::node::Node;

/// Distinct-key count at which list form gives way to map form.
pub(crate) const BRANCH_MAP_THRESHOLD: usize = 8;

/// Child lookup keyed by static segment text.
#[derive(Debug)]
pub(crate) enum Branches {
    List(Vec<(Box<str>, Node)>),
    Map(HashMap<Box<str>, Node>),
}

impl Branches {
    pub(crate) fn new() -> Self {
        Branches::List(Vec::with_capacity(1))
    }

    /// Look up the child under `key`. Read path; safe for concurrent use
    /// once the tree is built.
    pub(crate) fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Branches::List(entries) => entries
                .iter()
                .find(|(k, _)| k.as_ref() == key)
                .map(|(_, node)| node),
            Branches::Map(entries) => entries.get(key),
        }
    }

    /// Fetch the child under `key`, creating an empty one if absent.
    ///
    /// Build-time only; concurrent calls are not supported. An insertion
    /// that finds the list already at [`BRANCH_MAP_THRESHOLD`] keys converts
    /// to map form first and inserts there.
    pub(crate) fn grow(&mut self, key: &str) -> &mut Node {
        if let Branches::List(entries) = self {
            let known = entries.iter().any(|(k, _)| k.as_ref() == key);
            if !known && entries.len() >= BRANCH_MAP_THRESHOLD {
                let drained = std::mem::take(entries);
                *self = Branches::Map(drained.into_iter().collect());
            }
        }
        match self {
            Branches::List(entries) => {
                match entries.iter().position(|(k, _)| k.as_ref() == key) {
                    Some(index) => &mut entries[index].1,
                    None => {
                        entries.push((Box::from(key), Node::default()));
                        let index = entries.len() - 1;
                        &mut entries[index].1
                    }
                }
            }
            Branches::Map(entries) => entries.entry(Box::from(key)).or_default(),
        }
    }

    /// All child keys. Insertion order in list form, unspecified in map form.
    pub(crate) fn keys(&self) -> Vec<&str> {
        match self {
            Branches::List(entries) => entries.iter().map(|(k, _)| k.as_ref()).collect(),
            Branches::Map(entries) => entries.keys().map(|k| k.as_ref()).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        match self {
            Branches::List(entries) => entries.len(),
            Branches::Map(entries) => entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("child-{i}")).collect()
    }

    #[test]
    fn grow_returns_existing_child() {
        let mut branches = Branches::new();
        branches.grow("a");
        branches.grow("a");
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn stays_a_list_at_the_threshold() {
        let mut branches = Branches::new();
        for key in keys(BRANCH_MAP_THRESHOLD) {
            branches.grow(&key);
        }
        assert!(matches!(branches, Branches::List(_)));
        assert_eq!(branches.len(), BRANCH_MAP_THRESHOLD);
    }

    #[test]
    fn promotes_to_a_map_past_the_threshold() {
        let mut branches = Branches::new();
        for key in keys(BRANCH_MAP_THRESHOLD + 1) {
            branches.grow(&key);
        }
        assert!(matches!(branches, Branches::Map(_)));
        assert_eq!(branches.len(), BRANCH_MAP_THRESHOLD + 1);
    }

    #[test]
    fn growing_an_existing_key_never_promotes() {
        let mut branches = Branches::new();
        for key in keys(BRANCH_MAP_THRESHOLD) {
            branches.grow(&key);
        }
        branches.grow("child-0");
        assert!(matches!(branches, Branches::List(_)));
    }

    #[test]
    fn both_forms_answer_get_identically() {
        let all = keys(BRANCH_MAP_THRESHOLD + 4);
        let mut list = Branches::new();
        for key in &all[..4] {
            list.grow(key);
        }
        let mut map = Branches::new();
        for key in &all {
            map.grow(key);
        }
        assert!(matches!(list, Branches::List(_)));
        assert!(matches!(map, Branches::Map(_)));
        for key in &all[..4] {
            assert!(list.get(key).is_some());
            assert!(map.get(key).is_some());
        }
        assert!(list.get("absent").is_none());
        assert!(map.get("absent").is_none());
    }

    #[test]
    fn keys_cover_every_child() {
        let mut branches = Branches::new();
        for key in keys(BRANCH_MAP_THRESHOLD + 2) {
            branches.grow(&key);
        }
        let mut listed = branches
            .keys()
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        listed.sort();
        let mut expected = keys(BRANCH_MAP_THRESHOLD + 2);
        expected.sort();
        assert_eq!(listed, expected);
    }
}
