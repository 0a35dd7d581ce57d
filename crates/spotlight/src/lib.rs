//! # Referral Spotlight
//!
//! Free-text search over a sponsorship forest.
//!
//! Spotlight is a marking operation, not a filter: it returns the matching
//! nodes as a flat list plus their keys as a highlight set, and leaves the
//! forest untouched. The caller decides whether to render the flat result
//! list or the full tree with highlights applied. It layers over whatever
//! forest it is given, filtered or not.

mod spotlight;

pub use spotlight::{search, SearchOutcome};
