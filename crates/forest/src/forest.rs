use std::collections::HashMap;

use crate::aggregate;
use crate::error::{ForestError, Result};
use crate::node::TreeNode;

/// Child-index path from a root to a node: `path[0]` is the root position,
/// each following entry a position in the previous node's `children`.
pub type NodePath = Vec<usize>;

/// The sponsorship forest: disjoint trees plus a code index.
///
/// Built once per record load by [`crate::build_forest`]; filtered and
/// searched views are derived from it without mutating it.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    pub roots: Vec<TreeNode>,
    index: HashMap<String, NodePath>,
    member_count: usize,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        roots: Vec<TreeNode>,
        index: HashMap<String, NodePath>,
        member_count: usize,
    ) -> Self {
        Self {
            roots,
            index,
            member_count,
        }
    }

    /// Look up a node by member code.
    pub fn get(&self, code: &str) -> Option<&TreeNode> {
        let path = self.index.get(code)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// Like [`Forest::get`], but a missing code is an error.
    pub fn require(&self, code: &str) -> Result<&TreeNode> {
        self.get(code)
            .ok_or_else(|| ForestError::MemberNotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All indexed member codes, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Total number of members in the forest, including unindexed
    /// (empty-code) ones.
    pub fn len(&self) -> usize {
        self.member_count
    }

    pub fn is_empty(&self) -> bool {
        self.member_count == 0
    }

    /// Codes of members whose declared sponsor could not be resolved, for the
    /// dashboard's dangling-reference report.
    pub fn orphan_codes(&self) -> Vec<String> {
        let mut codes = Vec::new();
        let mut stack: Vec<&TreeNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.user.is_orphaned {
                codes.push(node.key.clone());
            }
            stack.extend(node.children.iter());
        }
        codes.sort();
        codes
    }

    /// Deepest level of the forest, with roots at level 1. Empty forest = 0.
    pub fn depth(&self) -> usize {
        aggregate::aggregate(&self.roots).active_levels
    }
}
