use std::collections::HashSet;

use referral_forest::TreeNode;

/// Result of a spotlight query.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome<'a> {
    /// Matching nodes in depth-first document order; `None` for an empty
    /// query, meaning "show the full forest".
    pub results: Option<Vec<&'a TreeNode>>,

    /// Keys of the matching nodes, for highlight rendering.
    pub highlight: HashSet<String>,
}

impl SearchOutcome<'_> {
    pub fn is_active(&self) -> bool {
        self.results.is_some()
    }
}

/// Case-insensitive substring search against each member's name, email and
/// code. Does not restructure or mutate the forest.
pub fn search<'a>(roots: &'a [TreeNode], query: &str) -> SearchOutcome<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchOutcome::default();
    }

    let mut results = Vec::new();
    let mut highlight = HashSet::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for root in roots {
        visit(root, &needle, &mut results, &mut highlight, &mut seen);
    }

    SearchOutcome {
        results: Some(results),
        highlight,
    }
}

fn visit<'a>(
    node: &'a TreeNode,
    needle: &str,
    results: &mut Vec<&'a TreeNode>,
    highlight: &mut HashSet<String>,
    seen: &mut HashSet<&'a str>,
) {
    if !node.key.is_empty() && !seen.insert(node.key.as_str()) {
        return;
    }

    let haystack = format!(
        "{} {} {}",
        node.user.name, node.user.email, node.user.code
    )
    .to_lowercase();
    if haystack.contains(needle) {
        results.push(node);
        if !node.key.is_empty() {
            highlight.insert(node.key.clone());
        }
    }

    for child in &node.children {
        visit(child, needle, results, highlight, seen);
    }
}
