use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::node::TreeNode;

/// Which nodes a tree view currently shows expanded.
///
/// Pure key-set semantics, independent of node content, so the state survives
/// a forest rebuild that reuses the same codes. Passed explicitly by the
/// presentation layer rather than held as shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one node; returns whether it is expanded afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    /// Expand every keyed node reachable from the given roots.
    pub fn expand_all(&mut self, roots: &[TreeNode]) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&TreeNode> = roots.iter().collect();
        while let Some(node) = stack.pop() {
            if !node.key.is_empty() {
                if !seen.insert(node.key.as_str()) {
                    continue;
                }
                self.expanded.insert(node.key.clone());
            }
            stack.extend(node.children.iter());
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_forest;
    use pretty_assertions::assert_eq;
    use referral_model::NetworkMember;

    fn member(code: &str, sponsor: Option<&str>) -> NetworkMember {
        NetworkMember {
            id: code.to_string(),
            code: code.to_string(),
            sponsor_code: sponsor.map(str::to_string),
            is_root_user: sponsor.is_none(),
            name: format!("Member {code}"),
            ..NetworkMember::default()
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = ExpansionState::new();

        assert!(state.toggle("A"));
        assert!(state.is_expanded("A"));
        assert!(!state.toggle("A"));
        assert!(!state.is_expanded("A"));
        assert!(state.is_empty());
    }

    #[test]
    fn expand_all_covers_every_reachable_key() {
        let forest = build_forest(vec![
            member("R", None),
            member("A", Some("R")),
            member("B", Some("A")),
        ]);

        let mut state = ExpansionState::new();
        state.expand_all(&forest.roots);

        assert_eq!(state.len(), 3);
        assert!(state.is_expanded("B"));

        state.collapse_all();
        assert!(state.is_empty());
    }

    #[test]
    fn state_survives_a_rebuild_with_the_same_codes() {
        let records = vec![member("R", None), member("A", Some("R"))];
        let first = build_forest(records.clone());

        let mut state = ExpansionState::new();
        state.expand_all(&first.roots);

        let rebuilt = build_forest(records);
        assert!(rebuilt.keys().all(|key| state.is_expanded(key)));
    }
}
