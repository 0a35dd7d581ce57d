use referral_model::NetworkMember;
use serde::{Deserialize, Serialize};

/// One member in the sponsorship forest.
///
/// Each node exclusively owns its children; a node never appears under more
/// than one parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// The member's `code`; node identity across all engine components.
    pub key: String,

    pub user: NetworkMember,

    /// Sorted by `(order, name, code)` ascending.
    pub children: Vec<TreeNode>,

    /// Copy of `sponsor_order`, the primary sibling sort key.
    pub order: i32,
}

impl TreeNode {
    pub fn new(user: NetworkMember) -> Self {
        Self {
            key: user.code.clone(),
            order: user.sponsor_order,
            user,
            children: Vec::new(),
        }
    }
}
