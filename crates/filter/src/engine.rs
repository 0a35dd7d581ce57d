use referral_forest::TreeNode;
use serde::{Deserialize, Serialize};

use crate::criteria::FilterCriteria;

/// Which reduction algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep matching nodes (with their subtrees unfiltered); elide
    /// non-matching nodes, promoting surviving descendants into their place.
    Strict,
    /// Keep whole root trees that contain at least one matching member.
    Network,
}

/// Reduce a forest by criteria, producing a new roots array.
///
/// The input is never mutated. Empty criteria return the input unchanged in
/// content, whatever the mode.
pub fn apply(roots: &[TreeNode], criteria: &FilterCriteria, mode: FilterMode) -> Vec<TreeNode> {
    if criteria.is_empty() {
        return roots.to_vec();
    }

    let reduced = match mode {
        FilterMode::Strict => filter_strict(roots, criteria),
        FilterMode::Network => roots
            .iter()
            .filter(|root| subtree_matches(root, criteria))
            .cloned()
            .collect(),
    };

    log::debug!(
        "{mode:?} filter reduced {} roots to {}",
        roots.len(),
        reduced.len()
    );
    reduced
}

/// Match-keeps-subtree: a matching node is emitted as-is; a non-matching node
/// contributes whatever its children yield, at its own level.
fn filter_strict(nodes: &[TreeNode], criteria: &FilterCriteria) -> Vec<TreeNode> {
    let mut kept = Vec::new();
    for node in nodes {
        if criteria.matches(&node.user) {
            kept.push(node.clone());
        } else {
            kept.extend(filter_strict(&node.children, criteria));
        }
    }
    kept
}

fn subtree_matches(node: &TreeNode, criteria: &FilterCriteria) -> bool {
    criteria.matches(&node.user)
        || node
            .children
            .iter()
            .any(|child| subtree_matches(child, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use referral_forest::build_forest;
    use referral_model::{NetworkMember, Tier};

    fn member(code: &str, sponsor: Option<&str>, tier: Tier) -> NetworkMember {
        NetworkMember {
            id: code.to_string(),
            code: code.to_string(),
            sponsor_code: sponsor.map(str::to_string),
            is_root_user: sponsor.is_none(),
            name: format!("Member {code}"),
            tier,
            ..NetworkMember::default()
        }
    }

    fn gold_only() -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        criteria.tiers.insert(Tier::Gold);
        criteria
    }

    #[test]
    fn empty_criteria_are_the_identity_transform() {
        let forest = build_forest(vec![
            member("R", None, Tier::Bronze),
            member("A", Some("R"), Tier::Gold),
        ]);

        for mode in [FilterMode::Strict, FilterMode::Network] {
            let out = apply(&forest.roots, &FilterCriteria::new(), mode);
            assert_eq!(out, forest.roots);
        }
    }

    #[test]
    fn strict_promotes_a_matching_middle_node_to_root() {
        // A -> B -> C, only B matches.
        let forest = build_forest(vec![
            member("A", None, Tier::Bronze),
            member("B", Some("A"), Tier::Gold),
            member("C", Some("B"), Tier::Bronze),
        ]);

        let out = apply(&forest.roots, &gold_only(), FilterMode::Strict);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, "B");
        // Match keeps its subtree unfiltered: C stays under B.
        assert_eq!(out[0].children.len(), 1);
        assert_eq!(out[0].children[0].key, "C");
    }

    #[test]
    fn strict_promotes_surviving_siblings_of_an_elided_node() {
        let forest = build_forest(vec![
            member("R", None, Tier::Bronze),
            member("A", Some("R"), Tier::Gold),
            member("B", Some("R"), Tier::Bronze),
            member("C", Some("B"), Tier::Gold),
        ]);

        let out = apply(&forest.roots, &gold_only(), FilterMode::Strict);

        let keys: Vec<&str> = out.iter().map(|node| node.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "C"]);
    }

    #[test]
    fn network_keeps_whole_trees_containing_a_match() {
        let forest = build_forest(vec![
            member("R", None, Tier::Bronze),
            member("A", Some("R"), Tier::Bronze),
            member("B", Some("A"), Tier::Gold),
            member("S", None, Tier::Bronze),
            member("T", Some("S"), Tier::Bronze),
        ]);

        let out = apply(&forest.roots, &gold_only(), FilterMode::Network);

        // R's tree survives in full; S's tree has no match and is dropped.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, "R");
        assert_eq!(out[0].children[0].key, "A");
        assert_eq!(out[0].children[0].children[0].key, "B");
    }

    #[test]
    fn filtering_does_not_mutate_the_input() {
        let forest = build_forest(vec![
            member("R", None, Tier::Bronze),
            member("A", Some("R"), Tier::Gold),
        ]);
        let before = forest.roots.clone();

        let _ = apply(&forest.roots, &gold_only(), FilterMode::Strict);
        let _ = apply(&forest.roots, &gold_only(), FilterMode::Network);

        assert_eq!(forest.roots, before);
    }
}
