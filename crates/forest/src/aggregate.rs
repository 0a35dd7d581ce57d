use std::collections::HashSet;

use referral_model::Status;
use serde::{Deserialize, Serialize};

use crate::node::TreeNode;

/// Fixed-shape statistics over a forest or sub-forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_users: usize,
    pub total_earnings: f64,
    pub total_wallet_balance: f64,
    pub active_users: usize,
    /// Deepest level present, with roots at level 1.
    pub active_levels: usize,
    pub total_referrals: u64,
    /// `total_earnings / total_users`, 0 for an empty forest.
    pub average_earnings: f64,
}

/// Walk every node exactly once and accumulate statistics.
///
/// Takes any set of roots (the full forest, a filtered sub-forest, or a flat
/// search result list) and reports on those nodes only. Keyed nodes are
/// visited at most once, so overlapping subtrees in the input do not double
/// count.
pub fn aggregate<'a, I>(roots: I) -> NetworkStats
where
    I: IntoIterator<Item = &'a TreeNode>,
{
    let mut stats = NetworkStats::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&TreeNode, usize)> = roots.into_iter().map(|root| (root, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        if !node.key.is_empty() && !seen.insert(node.key.as_str()) {
            continue;
        }

        stats.total_users += 1;
        stats.total_earnings += node.user.earnings;
        stats.total_wallet_balance += node.user.wallet_balance;
        stats.total_referrals += u64::from(node.user.referrals);
        if node.user.status == Status::Active {
            stats.active_users += 1;
        }
        if depth > stats.active_levels {
            stats.active_levels = depth;
        }

        for child in &node.children {
            stack.push((child, depth + 1));
        }
    }

    if stats.total_users > 0 {
        stats.average_earnings = stats.total_earnings / stats.total_users as f64;
    }
    stats
}
