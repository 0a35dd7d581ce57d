//! # Referral Forest
//!
//! Reconstructs the sponsorship hierarchy from a flat member collection and
//! computes aggregate statistics over it.
//!
//! ## Architecture
//!
//! ```text
//! NetworkMember[]
//!     │
//!     ├──> Forest Builder (arena + index)
//!     │      ├─ Index pass: code -> slot
//!     │      ├─ Link pass: resolve sponsors, flag orphans
//!     │      ├─ Cycle break: promote unreachable loops to orphan roots
//!     │      └─ Sibling sort: (order, name, code) ascending
//!     │
//!     ├──> Forest
//!     │      ├─ roots: Vec<TreeNode> (exclusive child ownership)
//!     │      └─ index: code -> path, for O(depth) lookup
//!     │
//!     ├──> Aggregator (counts, totals, max depth)
//!     │
//!     └──> Expansion State (expanded-key set for tree views)
//! ```
//!
//! The builder is total: duplicate codes, dangling sponsors, self-sponsorship
//! and sponsor cycles all degrade to documented shapes instead of failing, so
//! every input member stays reachable from exactly one root. Downstream
//! components never mutate a forest; they derive new values from it.

mod aggregate;
mod builder;
mod error;
mod expansion;
mod forest;
mod node;

pub use aggregate::{aggregate, NetworkStats};
pub use builder::{build_forest, build_forest_strict};
pub use error::{ForestError, Result};
pub use expansion::ExpansionState;
pub use forest::{Forest, NodePath};
pub use node::TreeNode;
