use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership tier ladder, lowest first.
///
/// `Ord` follows declaration order, so `Tier::Bronze < Tier::Diamond`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    /// Parse a tier label, case-insensitive. Unknown labels fall back to the
    /// lowest tier.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bronze" => Tier::Bronze,
            "silver" => Tier::Silver,
            "gold" => Tier::Gold,
            "platinum" => Tier::Platinum,
            "diamond" => Tier::Diamond,
            other => {
                if !other.is_empty() {
                    log::debug!("unknown tier label {other:?}, defaulting to bronze");
                }
                Tier::Bronze
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Diamond => "diamond",
        }
    }
}

/// Account standing of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Historic endpoints omit the field entirely for members in good
    /// standing, so absent parses as active.
    #[default]
    Active,
    Pending,
    Suspended,
    Inactive,
}

impl Status {
    /// Parse a status label, case-insensitive. Unknown labels fall back to
    /// active.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" => Status::Active,
            "pending" => Status::Pending,
            "suspended" => Status::Suspended,
            "inactive" => Status::Inactive,
            other => {
                if !other.is_empty() {
                    log::debug!("unknown status label {other:?}, defaulting to active");
                }
                Status::Active
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Pending => "pending",
            Status::Suspended => "suspended",
            Status::Inactive => "inactive",
        }
    }
}

/// Canonical per-member record consumed by every engine component.
///
/// Produced by the normalizer with every field populated; the only field
/// mutated after that is `is_orphaned`, which the forest builder sets when a
/// declared sponsor cannot be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMember {
    /// Opaque unique identifier. Falls back to `code` when the source record
    /// carries none.
    pub id: String,

    /// Unique tree linkage key. Empty for malformed records, which can then
    /// never be a parent or a sponsor target.
    pub code: String,

    /// Sponsor's `code`; `None` marks a root candidate.
    pub sponsor_code: Option<String>,

    /// Sibling ordering tie-break, lowest first.
    pub sponsor_order: i32,

    pub name: String,
    pub email: String,
    pub phone: String,

    pub tier: Tier,
    /// Free-form rank label assigned by the compensation plan.
    pub level: String,
    /// Direct referral count.
    pub referrals: u32,
    pub earnings: f64,
    pub wallet_balance: f64,
    pub status: Status,
    pub join_date: Option<DateTime<Utc>>,

    /// Opaque grouping tags used by the dashboard.
    pub network_id: Option<String>,
    pub network_name: String,
    pub network_color: String,

    /// True iff the record declared no sponsor.
    pub is_root_user: bool,
    /// Set by the forest builder: the declared sponsor does not resolve to
    /// any known member.
    pub is_orphaned: bool,
}
