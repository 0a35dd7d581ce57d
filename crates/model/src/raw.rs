use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Loosely-typed member record as returned by the REST API.
///
/// Every field is optional and decoded leniently: the API has historically
/// renamed fields between endpoints (covered by `alias`) and emitted numbers
/// as strings, ids as numbers, and timestamps as either epoch milliseconds or
/// RFC 3339 text (covered by the `deserialize_with` helpers). Values of an
/// unusable JSON type decode as `None` rather than failing the record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMemberRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub id: Option<String>,

    #[serde(alias = "referenceCode", deserialize_with = "text_or_number")]
    pub code: Option<String>,

    #[serde(alias = "referredByCode", deserialize_with = "text_or_number")]
    pub sponsor_code: Option<String>,

    #[serde(deserialize_with = "lenient_i64")]
    pub sponsor_order: Option<i64>,

    pub name: Option<String>,
    pub email: Option<String>,

    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,

    pub tier: Option<String>,
    pub level: Option<String>,

    #[serde(alias = "referralCount", deserialize_with = "lenient_i64")]
    pub referrals: Option<i64>,

    #[serde(alias = "totalEarnings", deserialize_with = "lenient_f64")]
    pub earnings: Option<f64>,

    #[serde(deserialize_with = "lenient_f64")]
    pub wallet_balance: Option<f64>,

    pub status: Option<String>,

    #[serde(alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub join_date: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "text_or_number")]
    pub network_id: Option<String>,

    pub network_name: Option<String>,
    pub network_color: Option<String>,
}

/// Accept a JSON string or number, rendering numbers to their decimal text.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

/// Accept epoch milliseconds, an RFC 3339 string, or a plain `YYYY-MM-DD`
/// date (taken as midnight UTC).
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_timestamp_text(s.trim()),
        _ => None,
    }))
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
