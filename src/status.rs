//! Status Derivations
//!
//! Label lookup for group statuses and the pending/approved/rejected split of
//! a group's applications.

use crate::models::{GroupApplication, TravelGroup};

// ========================
// Group Status
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    Recruiting,
    Full,
    Traveling,
    Ended,
    Cancelled,
    Other(String),
}

impl GroupStatus {
    /// Server strings plus their English aliases
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "招募中" | "open" | "recruiting" => GroupStatus::Recruiting,
            "已满员" | "full" => GroupStatus::Full,
            "已出行" | "traveling" => GroupStatus::Traveling,
            "已结束" | "ended" => GroupStatus::Ended,
            "已取消" | "cancelled" => GroupStatus::Cancelled,
            other => GroupStatus::Other(other.to_string()),
        }
    }
}

/// Badge text and CSS class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub text: String,
    pub class: &'static str,
}

impl StatusDisplay {
    fn new(text: &str, class: &'static str) -> Self {
        Self { text: text.to_string(), class }
    }
}

/// Badge for a status; an open group at capacity reads as full
pub fn status_display(raw: &str, current_members: u32, max_members: u32) -> StatusDisplay {
    let status = GroupStatus::parse(raw);
    if status == GroupStatus::Recruiting && current_members >= max_members {
        return StatusDisplay::new("Full", "full");
    }
    match status {
        GroupStatus::Recruiting => StatusDisplay::new("Recruiting", "recruiting"),
        GroupStatus::Full => StatusDisplay::new("Full", "full"),
        GroupStatus::Traveling => StatusDisplay::new("Traveling", "traveling"),
        GroupStatus::Ended => StatusDisplay::new("Ended", "ended"),
        GroupStatus::Cancelled => StatusDisplay::new("Closed", "cancelled"),
        GroupStatus::Other(s) => StatusDisplay { text: s, class: "default" },
    }
}

/// Non-creators may act on a group while it recruits or once it is at capacity
pub fn shows_join_actions(group: &TravelGroup) -> bool {
    GroupStatus::parse(&group.status) == GroupStatus::Recruiting || group.is_at_capacity()
}

/// Creator may start the group itinerary once the group is full
pub fn can_create_itinerary(group: &TravelGroup) -> bool {
    GroupStatus::parse(&group.status) == GroupStatus::Full
}

/// Creator may close a group that is still recruiting or full
pub fn can_close_group(group: &TravelGroup) -> bool {
    matches!(GroupStatus::parse(&group.status), GroupStatus::Recruiting | GroupStatus::Full)
}

/// Server string for a closed group
pub const CLOSED_STATUS: &str = "已取消";

// ========================
// Applications
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "待审核" | "pending" => Some(Self::Pending),
            "已同意" | "approved" => Some(Self::Approved),
            "已拒绝" | "rejected" => Some(Self::Rejected),
            "已撤回" | "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

/// Review panel tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationFilter {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationFilter {
    pub const ALL: [ApplicationFilter; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Pending => "No pending applications",
            Self::Approved => "No approved applications",
            Self::Rejected => "No rejected applications",
        }
    }
}

/// Applications split by status, original order kept in each bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationBuckets {
    pub pending: Vec<GroupApplication>,
    pub approved: Vec<GroupApplication>,
    pub rejected: Vec<GroupApplication>,
}

impl ApplicationBuckets {
    pub fn partition(applications: &[GroupApplication]) -> Self {
        let mut buckets = Self::default();
        for app in applications {
            match ApplicationStatus::parse(&app.status) {
                Some(ApplicationStatus::Pending) => buckets.pending.push(app.clone()),
                Some(ApplicationStatus::Approved) => buckets.approved.push(app.clone()),
                Some(ApplicationStatus::Rejected) => buckets.rejected.push(app.clone()),
                Some(ApplicationStatus::Withdrawn) | None => {}
            }
        }
        buckets
    }

    pub fn bucket(&self, filter: ApplicationFilter) -> &[GroupApplication] {
        match filter {
            ApplicationFilter::Pending => &self.pending,
            ApplicationFilter::Approved => &self.approved,
            ApplicationFilter::Rejected => &self.rejected,
        }
    }

    pub fn count(&self, filter: ApplicationFilter) -> usize {
        self.bucket(filter).len()
    }
}

pub fn is_pending(app: &GroupApplication) -> bool {
    ApplicationStatus::parse(&app.status) == Some(ApplicationStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: i64, status: &str) -> GroupApplication {
        GroupApplication {
            id,
            applicant_id: Some(100 + id),
            applicant_name: format!("user{}", id),
            avatar_url: None,
            message: "let me in".to_string(),
            status: status.to_string(),
            apply_date: None,
            process_date: None,
        }
    }

    fn group(status: &str, current: u32, max: u32) -> TravelGroup {
        TravelGroup {
            id: 1,
            title: "g".into(),
            description: None,
            status: status.into(),
            is_public: true,
            start_date: None,
            end_date: None,
            max_members: max,
            current_members: current,
            estimated_budget: None,
            group_type: None,
            travel_tags: vec![],
            creator: None,
            members: vec![],
            destination: None,
            group_avatar_url: None,
            compatibility_score: None,
        }
    }

    #[test]
    fn test_open_at_capacity_reads_full() {
        assert_eq!(status_display("open", 5, 5), StatusDisplay::new("Full", "full"));
        assert_eq!(status_display("招募中", 6, 5).class, "full");
        assert_eq!(status_display("open", 4, 5), StatusDisplay::new("Recruiting", "recruiting"));
    }

    #[test]
    fn test_override_only_applies_to_open() {
        assert_eq!(status_display("已结束", 5, 5), StatusDisplay::new("Ended", "ended"));
        assert_eq!(status_display("已取消", 2, 5), StatusDisplay::new("Closed", "cancelled"));
        assert_eq!(status_display("已出行", 5, 5).class, "traveling");
    }

    #[test]
    fn test_unknown_status_passes_through() {
        assert_eq!(status_display("archived", 0, 5), StatusDisplay::new("archived", "default"));
    }

    #[test]
    fn test_partition_scenario() {
        let apps = vec![app(1, "pending"), app(2, "approved"), app(3, "pending"), app(4, "rejected")];
        let buckets = ApplicationBuckets::partition(&apps);
        assert_eq!(buckets.count(ApplicationFilter::Pending), 2);
        assert_eq!(buckets.count(ApplicationFilter::Approved), 1);
        assert_eq!(buckets.count(ApplicationFilter::Rejected), 1);
        let pending: Vec<i64> = buckets.pending.iter().map(|a| a.id).collect();
        assert_eq!(pending, vec![1, 3]);
    }

    #[test]
    fn test_server_strings_and_withdrawn() {
        let apps = vec![app(1, "待审核"), app(2, "已撤回"), app(3, "已同意"), app(4, "???")];
        let buckets = ApplicationBuckets::partition(&apps);
        assert_eq!(buckets.pending.len(), 1);
        assert_eq!(buckets.approved.len(), 1);
        assert!(buckets.rejected.is_empty());
    }

    #[test]
    fn test_bucket_keeps_order() {
        let apps = vec![app(3, "rejected"), app(1, "pending"), app(2, "rejected")];
        let buckets = ApplicationBuckets::partition(&apps);
        let rejected: Vec<i64> = buckets.bucket(ApplicationFilter::Rejected).iter().map(|a| a.id).collect();
        assert_eq!(rejected, vec![3, 2]);
        assert!(is_pending(&buckets.pending[0]));
    }

    #[test]
    fn test_group_actions_by_status() {
        let mut g = group("已满员", 4, 4);
        assert!(can_create_itinerary(&g));
        assert!(can_close_group(&g));
        assert!(shows_join_actions(&g));
        g.status = "招募中".into();
        g.current_members = 2;
        assert!(!can_create_itinerary(&g));
        assert!(can_close_group(&g));
        g.status = CLOSED_STATUS.into();
        assert!(!can_close_group(&g));
        assert!(!shows_join_actions(&g));
        assert_eq!(status_display(&g.status, g.current_members, g.max_members).class, "cancelled");
    }

    #[test]
    fn test_empty_list() {
        let buckets = ApplicationBuckets::partition(&[]);
        for f in ApplicationFilter::ALL {
            assert_eq!(buckets.count(f), 0);
        }
    }
}
