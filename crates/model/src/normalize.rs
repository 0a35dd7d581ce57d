use serde_json::Value;

use crate::member::{NetworkMember, Status, Tier};
use crate::raw::RawMemberRecord;

/// Map raw REST records into canonical members, one per input record.
///
/// Total: records that cannot be decoded at all are retained with best-effort
/// identity instead of being rejected.
pub fn normalize_records(raw: &[Value]) -> Vec<NetworkMember> {
    raw.iter().map(normalize_record).collect()
}

/// Normalize a single raw record.
pub fn normalize_record(raw: &Value) -> NetworkMember {
    let record = match RawMemberRecord::deserialize_value(raw) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("unreadable member record ({err}); retaining with empty identity");
            RawMemberRecord::default()
        }
    };

    let code = non_blank(record.code);
    let sponsor_code = non_blank(record.sponsor_code);
    // The id is only needed for identity, so the code stands in for a
    // missing one; a record missing both keeps empty strings.
    let id = non_blank(record.id).unwrap_or_else(|| code.clone().unwrap_or_default());

    // Some endpoints report earnings under walletBalance only.
    let wallet_balance = record.wallet_balance.unwrap_or(0.0).max(0.0);
    let earnings = record
        .earnings
        .or(record.wallet_balance)
        .unwrap_or(0.0)
        .max(0.0);

    let is_root_user = sponsor_code.is_none();

    NetworkMember {
        id,
        code: code.unwrap_or_default(),
        sponsor_code,
        sponsor_order: record.sponsor_order.unwrap_or(0) as i32,
        name: record.name.unwrap_or_default(),
        email: record.email.unwrap_or_default(),
        phone: record.phone.unwrap_or_default(),
        tier: record.tier.as_deref().map(Tier::parse).unwrap_or_default(),
        level: record.level.unwrap_or_default(),
        referrals: record.referrals.unwrap_or(0).max(0) as u32,
        earnings,
        wallet_balance,
        status: record
            .status
            .as_deref()
            .map(Status::parse)
            .unwrap_or_default(),
        join_date: record.join_date,
        network_id: non_blank(record.network_id),
        network_name: record.network_name.unwrap_or_default(),
        network_color: record.network_color.unwrap_or_default(),
        is_root_user,
        is_orphaned: false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RawMemberRecord {
    fn deserialize_value(raw: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw.clone())
    }
}
