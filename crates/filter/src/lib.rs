//! # Referral Filter
//!
//! Compound criteria filtering over a sponsorship forest.
//!
//! A member matches when it satisfies every supplied criterion (AND across
//! categories, OR within a multi-value category). Two reduction modes:
//!
//! - **Strict**: a matching node is kept with its entire subtree unfiltered;
//!   a non-matching node is elided and its surviving descendants are promoted
//!   into its place.
//! - **Network**: a root tree survives in full if any member inside it
//!   matches; trees with no match are dropped. Nothing inside a retained tree
//!   is pruned, so the strict result is always a subset of the network one.
//!
//! Both modes derive a new forest and never mutate the input; empty criteria
//! are the identity transform.

mod criteria;
mod engine;

pub use criteria::{DateRange, FilterCriteria};
pub use engine::{apply, FilterMode};
