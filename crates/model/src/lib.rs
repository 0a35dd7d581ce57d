//! # Referral Model
//!
//! Canonical member records for the referral network engine.
//!
//! The upstream REST API returns member records with inconsistent field
//! names across endpoints (`code` vs `referenceCode`, `sponsorCode` vs
//! `referredByCode`, numbers encoded as strings, timestamps as either epoch
//! millis or RFC 3339 text). This crate absorbs all of that at the boundary:
//!
//! ```text
//! serde_json::Value[]
//!     │
//!     ├──> RawMemberRecord (lenient decode, field aliases)
//!     │
//!     └──> NetworkMember (every field populated with explicit fallbacks)
//! ```
//!
//! Normalization is total: malformed records degrade to documented defaults
//! instead of failing, so downstream components never see an error from here.

mod member;
mod normalize;
mod raw;

pub use member::{NetworkMember, Status, Tier};
pub use normalize::{normalize_record, normalize_records};
pub use raw::RawMemberRecord;
