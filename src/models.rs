//! Frontend Models
//!
//! Typed shapes of the backend responses and requests, plus the staged
//! attraction kept in the transfer station. Loose server fields (nullable
//! strings, numeric ids) are narrowed here so views never see raw JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

// ========================
// Boundary Helpers
// ========================

/// Treat an explicit `null` like a missing field
fn null_to_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

/// Ids arrive as numbers from the server and as strings from older slots
fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

fn opt_id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?.map(String::from))
}

// ========================
// Envelope
// ========================

/// `{ success, data, message }` wrapper used by every endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Payload of a successful call that may legitimately carry `null`
    pub fn into_optional(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request was rejected".to_string()),
            ))
        }
    }
}

// ========================
// Groups
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub username: String,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Spring-style page; only the content is used
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Travel group as returned by list and detail endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelGroup {
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_public: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_members: u32,
    #[serde(default)]
    pub current_members: u32,
    pub estimated_budget: Option<f64>,
    pub group_type: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub travel_tags: Vec<String>,
    pub creator: Option<UserRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub members: Vec<Member>,
    pub destination: Option<Destination>,
    pub group_avatar_url: Option<String>,
    /// Server ranking value on recommendation lists; opaque here
    pub compatibility_score: Option<f64>,
}

impl TravelGroup {
    pub fn free_slots(&self) -> u32 {
        self.max_members.saturating_sub(self.current_members)
    }

    pub fn is_at_capacity(&self) -> bool {
        self.current_members >= self.max_members
    }

    pub fn destination_name(&self) -> &str {
        self.destination.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }

    pub fn creator_id(&self) -> Option<i64> {
        self.creator.as_ref().map(|c| c.id)
    }
}

/// Caller's relation to a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupStatus {
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub has_pending_application: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupItinerary {
    pub id: i64,
    pub title: Option<String>,
}

/// `/auth/status` is not wrapped in an envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    #[serde(default)]
    pub success: bool,
    pub user_id: Option<i64>,
}

// ========================
// Applications
// ========================

/// Membership application as listed for the group creator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupApplication {
    pub id: i64,
    pub applicant_id: Option<i64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub applicant_name: String,
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: String,
    pub apply_date: Option<NaiveDateTime>,
    pub process_date: Option<NaiveDateTime>,
}

// ========================
// Tags
// ========================

/// `/tags` returns either bare names or `{ tag }` objects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TravelTag {
    Name(String),
    Entity { tag: String },
}

impl TravelTag {
    pub fn into_name(self) -> String {
        match self {
            TravelTag::Name(n) => n,
            TravelTag::Entity { tag } => tag,
        }
    }
}

/// Used when the tag endpoint is unavailable
pub const DEFAULT_TRAVEL_TAGS: &[&str] = &[
    "自然风光", "历史足迹", "文化体验", "购物探店", "娱乐休闲",
    "冒险刺激", "摄影天堂", "艺术巡礼", "美食寻味", "户外徒步",
    "海岛度假", "心灵疗愈", "毕业旅行", "亲子游玩", "背包独行",
    "自驾路线", "网红热点", "小众秘境", "避暑胜地", "城市漫步",
    "田园民俗", "江南园林", "大漠风光", "温泉养生", "冰雪世界",
    "古迹村落", "考古博物", "极限运动", "浪漫之旅", "建筑奇观",
];

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub title: String,
    pub description: String,
    pub destination_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_budget: Option<f64>,
    pub max_members: u32,
    pub group_type: String,
    pub is_public: bool,
    pub travel_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub application_message: String,
    /// Comma-joined tag names
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest<'a> {
    pub preferences: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate<'a> {
    pub status: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItineraryRequest {
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub traveler_count: u32,
    pub permission_status: &'static str,
}

impl CreateItineraryRequest {
    pub fn for_group(group: &TravelGroup) -> Self {
        Self {
            title: format!("{} - Group itinerary", group.title),
            start_date: group.start_date,
            end_date: group.end_date,
            budget: group.estimated_budget,
            traveler_count: group.max_members,
            permission_status: "所有人可见",
        }
    }
}

// ========================
// Transfer Station
// ========================

/// Attraction pinned in the transfer station.
/// Field names match the existing localStorage slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub join_count: u64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub destination_id: Option<String>,
    pub destination_name: Option<String>,
    #[serde(rename = "addedAt")]
    pub staged_at: DateTime<Utc>,
}

/// Drag payload: an attraction from any page, or an entry already staged
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionPayload {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub join_count: u64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub destination_id: Option<String>,
    pub destination_name: Option<String>,
}

impl AttractionPayload {
    pub fn into_staged(self, staged_at: DateTime<Utc>) -> StagedItem {
        StagedItem {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            join_count: self.join_count,
            longitude: self.longitude,
            latitude: self.latitude,
            destination_id: self.destination_id,
            destination_name: self.destination_name,
            staged_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[test]
    fn test_envelope_success() {
        let env: Envelope<Vec<i64>> = serde_json::from_str(r#"{"success":true,"data":[1,2]}"#).unwrap();
        assert_eq!(env.into_optional().unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn test_envelope_rejected_carries_message() {
        let env: Envelope<IgnoredAny> =
            serde_json::from_str(r#"{"success":false,"message":"already applied"}"#).unwrap();
        assert_eq!(env.into_optional().unwrap_err(), ApiError::Rejected("already applied".into()));
    }

    #[test]
    fn test_envelope_null_data() {
        let env: Envelope<GroupItinerary> = serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert_eq!(env.into_optional().unwrap(), None);
    }

    #[test]
    fn test_group_narrows_nulls() {
        let json = r#"{
            "id": 7, "title": "Yunnan loop", "description": null, "status": "招募中",
            "isPublic": null, "startDate": "2025-07-01", "endDate": "2025-07-08",
            "maxMembers": 5, "currentMembers": 5, "estimatedBudget": 3000,
            "groupType": "自由行", "travelTags": null,
            "creator": {"id": 3, "username": "lin"},
            "members": [{"id": 3, "username": "lin", "role": "创建者"}],
            "destination": {"id": 11, "name": "Dali", "imageUrl": null}
        }"#;
        let g: TravelGroup = serde_json::from_str(json).unwrap();
        assert!(!g.is_public);
        assert!(g.travel_tags.is_empty());
        assert_eq!(g.start_date, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(g.destination_name(), "Dali");
        assert_eq!(g.free_slots(), 0);
        assert!(g.is_at_capacity());
        assert_eq!(g.creator_id(), Some(3));
    }

    #[test]
    fn test_application_dates() {
        let json = r#"{"id":1,"applicantId":4,"applicantName":"wu","message":"hi",
            "status":"待审核","applyDate":"2025-06-01T09:30:00"}"#;
        let a: GroupApplication = serde_json::from_str(json).unwrap();
        assert_eq!(a.apply_date.map(|d| d.date()), NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(a.process_date, None);
    }

    #[test]
    fn test_travel_tag_shapes() {
        let tags: Vec<TravelTag> = serde_json::from_str(r#"["beach", {"id":2,"tag":"food"}]"#).unwrap();
        let names: Vec<String> = tags.into_iter().map(TravelTag::into_name).collect();
        assert_eq!(names, vec!["beach", "food"]);
    }

    #[test]
    fn test_payload_numeric_ids() {
        let p: AttractionPayload = serde_json::from_str(
            r#"{"id":42,"name":"Erhai","description":null,"destinationId":11,"joinCount":3}"#,
        )
        .unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.destination_id.as_deref(), Some("11"));
        assert_eq!(p.description, "");
        assert_eq!(p.join_count, 3);
    }

    #[test]
    fn test_staged_item_keeps_slot_field_names() {
        let at = DateTime::parse_from_rfc3339("2025-05-01T08:00:00Z").unwrap().with_timezone(&Utc);
        let item = AttractionPayload {
            id: "A1".into(),
            name: "Tower".into(),
            description: String::new(),
            category: String::new(),
            image_url: String::new(),
            join_count: 0,
            longitude: Some(100.2),
            latitude: Some(25.6),
            destination_id: None,
            destination_name: None,
        }
        .into_staged(at);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["addedAt"], "2025-05-01T08:00:00Z");
        assert_eq!(json["imageUrl"], "");
        assert_eq!(json["joinCount"], 0);
    }

    #[test]
    fn test_create_request_body() {
        let req = CreateGroupRequest {
            title: "t".into(),
            description: String::new(),
            destination_id: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            estimated_budget: None,
            max_members: 4,
            group_type: "自由行".into(),
            is_public: true,
            travel_tags: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["destinationId"], 1);
        assert_eq!(json["startDate"], "2025-07-01");
        assert_eq!(json["isPublic"], true);
    }
}
