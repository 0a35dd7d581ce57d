use std::collections::HashSet;

use chrono::{DateTime, Utc};
use referral_model::{NetworkMember, Status, Tier};
use serde::{Deserialize, Serialize};

/// Bounds on a member's join date. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Compound filter criteria, as submitted by the dashboard's filter panel.
///
/// An empty set or an absent bound means "no restriction" for that category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub tiers: HashSet<Tier>,
    pub statuses: HashSet<Status>,
    /// Allowed `network_id` values.
    pub networks: HashSet<String>,
    pub min_earnings: Option<f64>,
    pub max_earnings: Option<f64>,
    pub min_referrals: Option<u32>,
    pub max_referrals: Option<u32>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no criterion is active; filtering with empty criteria is the
    /// identity transform.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
            && self.statuses.is_empty()
            && self.networks.is_empty()
            && self.min_earnings.is_none()
            && self.max_earnings.is_none()
            && self.min_referrals.is_none()
            && self.max_referrals.is_none()
            && self.date_range.is_empty()
    }

    /// AND across categories, OR within each multi-value category.
    ///
    /// A member with no `network_id` fails an active network criterion, and a
    /// member with no join date fails an active date bound.
    pub fn matches(&self, member: &NetworkMember) -> bool {
        if !self.tiers.is_empty() && !self.tiers.contains(&member.tier) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&member.status) {
            return false;
        }
        if !self.networks.is_empty() {
            match &member.network_id {
                Some(id) if self.networks.contains(id) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_earnings {
            if member.earnings < min {
                return false;
            }
        }
        if let Some(max) = self.max_earnings {
            if member.earnings > max {
                return false;
            }
        }
        if let Some(min) = self.min_referrals {
            if member.referrals < min {
                return false;
            }
        }
        if let Some(max) = self.max_referrals {
            if member.referrals > max {
                return false;
            }
        }
        if let Some(start) = self.date_range.start {
            match member.join_date {
                Some(joined) if joined >= start => {}
                _ => return false,
            }
        }
        if let Some(end) = self.date_range.end {
            match member.join_date {
                Some(joined) if joined <= end => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn member() -> NetworkMember {
        NetworkMember {
            code: "A".to_string(),
            tier: Tier::Gold,
            status: Status::Active,
            earnings: 500.0,
            referrals: 5,
            network_id: Some("7".to_string()),
            join_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..NetworkMember::default()
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&member()));
        assert!(criteria.matches(&NetworkMember::default()));
    }

    #[test]
    fn multi_value_categories_are_or_semantics() {
        let mut criteria = FilterCriteria::new();
        criteria.tiers.extend([Tier::Silver, Tier::Gold]);
        assert!(criteria.matches(&member()));

        criteria.tiers = [Tier::Diamond].into_iter().collect();
        assert!(!criteria.matches(&member()));
    }

    #[test]
    fn categories_combine_with_and_semantics() {
        let mut criteria = FilterCriteria::new();
        criteria.tiers.insert(Tier::Gold);
        criteria.min_earnings = Some(1000.0);

        // Tier matches but the earnings bound does not.
        assert!(!criteria.matches(&member()));

        criteria.min_earnings = Some(100.0);
        assert!(criteria.matches(&member()));
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let mut criteria = FilterCriteria::new();
        criteria.min_earnings = Some(500.0);
        criteria.max_earnings = Some(500.0);
        criteria.min_referrals = Some(5);
        criteria.max_referrals = Some(5);
        assert!(criteria.matches(&member()));

        criteria.max_referrals = Some(4);
        assert!(!criteria.matches(&member()));
    }

    #[test]
    fn missing_network_id_fails_an_active_network_criterion() {
        let mut criteria = FilterCriteria::new();
        criteria.networks.insert("7".to_string());
        assert!(criteria.matches(&member()));

        let mut unassigned = member();
        unassigned.network_id = None;
        assert!(!criteria.matches(&unassigned));
    }

    #[test]
    fn missing_join_date_fails_an_active_date_bound() {
        let mut criteria = FilterCriteria::new();
        criteria.date_range.start = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(criteria.matches(&member()));

        let mut dateless = member();
        dateless.join_date = None;
        assert!(!criteria.matches(&dateless));

        criteria.date_range.end = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert!(!criteria.matches(&member()));
    }

    #[test]
    fn criteria_decode_from_dashboard_json() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "tiers": ["gold", "diamond"],
            "minEarnings": 250.0,
            "dateRange": { "start": "2024-01-01T00:00:00Z" },
        }))
        .unwrap();

        assert_eq!(criteria.tiers.len(), 2);
        assert_eq!(criteria.min_earnings, Some(250.0));
        assert!(criteria.date_range.start.is_some());
        assert!(!criteria.is_empty());
        assert!(criteria.matches(&member()));
    }
}
