//! Membership Derivations
//!
//! "My groups" merge and the caller's standing in a single group.

use std::collections::HashSet;

use crate::models::{TravelGroup, UserGroupStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Creator,
    Member,
}

impl GroupRole {
    pub fn label(self) -> &'static str {
        match self {
            GroupRole::Creator => "Organizer",
            GroupRole::Member => "Member",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MyGroup {
    pub group: TravelGroup,
    pub role: GroupRole,
}

/// Created groups first, then joined groups not already listed
pub fn merge_my_groups(created: Vec<TravelGroup>, joined: Vec<TravelGroup>) -> Vec<MyGroup> {
    let mut seen = HashSet::new();
    let created = created.into_iter().map(|g| (g, GroupRole::Creator));
    let joined = joined.into_iter().map(|g| (g, GroupRole::Member));
    created
        .chain(joined)
        .filter(|(g, _)| seen.insert(g.id))
        .map(|(group, role)| MyGroup { group, role })
        .collect()
}

/// What the detail page offers a non-creator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Creator,
    Member,
    Pending,
    CanApply { free_slots: u32 },
    Full,
}

pub fn standing(group: &TravelGroup, current_user: Option<i64>, status: UserGroupStatus) -> Standing {
    let is_creator = status.is_creator || (current_user.is_some() && current_user == group.creator_id());
    if is_creator {
        Standing::Creator
    } else if status.is_member {
        Standing::Member
    } else if status.has_pending_application {
        Standing::Pending
    } else if group.current_members < group.max_members {
        Standing::CanApply { free_slots: group.free_slots() }
    } else {
        Standing::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRef;

    fn group(id: i64, creator: i64, current: u32, max: u32) -> TravelGroup {
        TravelGroup {
            id,
            title: format!("group {}", id),
            description: None,
            status: "招募中".to_string(),
            is_public: true,
            start_date: None,
            end_date: None,
            max_members: max,
            current_members: current,
            estimated_budget: None,
            group_type: None,
            travel_tags: vec![],
            creator: Some(UserRef { id: creator, username: "c".into(), avatar_url: None }),
            members: vec![],
            destination: None,
            group_avatar_url: None,
            compatibility_score: None,
        }
    }

    #[test]
    fn test_merge_prefers_created() {
        let created = vec![group(1, 9, 1, 4), group(2, 9, 1, 4)];
        let joined = vec![group(2, 9, 1, 4), group(3, 5, 2, 4)];
        let merged = merge_my_groups(created, joined);
        let view: Vec<(i64, GroupRole)> = merged.iter().map(|m| (m.group.id, m.role)).collect();
        assert_eq!(view, vec![(1, GroupRole::Creator), (2, GroupRole::Creator), (3, GroupRole::Member)]);
    }

    #[test]
    fn test_standing() {
        let g = group(1, 9, 2, 4);
        assert_eq!(standing(&g, Some(9), UserGroupStatus::default()), Standing::Creator);
        let member = UserGroupStatus { is_member: true, ..Default::default() };
        assert_eq!(standing(&g, Some(3), member), Standing::Member);
        let pending = UserGroupStatus { has_pending_application: true, ..Default::default() };
        assert_eq!(standing(&g, Some(3), pending), Standing::Pending);
        assert_eq!(standing(&g, Some(3), UserGroupStatus::default()), Standing::CanApply { free_slots: 2 });
        assert_eq!(standing(&group(1, 9, 4, 4), None, UserGroupStatus::default()), Standing::Full);
    }

    #[test]
    fn test_creator_standing_survives_refresh() {
        // Approvals fill the group; the creator's standing must not flip.
        let creator = UserGroupStatus { is_creator: true, ..Default::default() };
        let before = standing(&group(1, 9, 2, 4), Some(9), creator);
        let after = standing(&group(1, 9, 4, 4), Some(9), creator);
        assert_eq!(before, Standing::Creator);
        assert_eq!(before, after);
    }
}
