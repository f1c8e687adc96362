//! Form State and Validation
//!
//! Everything here runs before a request is sent; a rejected form never
//! reaches the network.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::{
    MAX_APPLICATION_MESSAGE, MAX_APPLICATION_TAGS, MAX_GROUP_MEMBERS, MIN_GROUP_MEMBERS,
};
use crate::error::ValidationError;
use crate::models::{ApplyRequest, CreateGroupRequest, Destination};

// ========================
// Tag Selection
// ========================

/// Ordered tag picks with an upper bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    selected: Vec<String>,
    max: usize,
}

impl TagSelection {
    pub fn new(max: usize) -> Self {
        Self { selected: Vec::new(), max }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.iter().any(|t| t == tag)
    }

    /// Deselect if picked, otherwise pick unless the limit is reached
    pub fn toggle(&mut self, tag: &str) -> Result<(), ValidationError> {
        if let Some(idx) = self.selected.iter().position(|t| t == tag) {
            self.selected.remove(idx);
            return Ok(());
        }
        if self.selected.len() >= self.max {
            return Err(ValidationError::TooManyTags { max: self.max });
        }
        self.selected.push(tag.to_string());
        Ok(())
    }

    /// At least one tag is required to ask for recommendations
    pub fn confirm(&self) -> Result<Vec<String>, ValidationError> {
        if self.selected.is_empty() {
            return Err(ValidationError::NoTags);
        }
        Ok(self.selected.clone())
    }
}

// ========================
// Join Application
// ========================

pub fn validate_application(message: &str, tags: &[String]) -> Result<ApplyRequest, ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if message.chars().count() > MAX_APPLICATION_MESSAGE {
        return Err(ValidationError::MessageTooLong { max: MAX_APPLICATION_MESSAGE });
    }
    if tags.len() > MAX_APPLICATION_TAGS {
        return Err(ValidationError::TooManyTags { max: MAX_APPLICATION_TAGS });
    }
    Ok(ApplyRequest {
        application_message: message.to_string(),
        preferences: tags.join(","),
    })
}

// ========================
// Create Group
// ========================

pub const GROUP_TYPES: &[(&str, &str)] = &[
    ("自由行", "Independent"),
    ("半自助", "Semi-guided"),
    ("深度游", "In-depth"),
];

/// Raw create-group inputs as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGroupForm {
    pub title: String,
    pub description: String,
    pub destination: Option<Destination>,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub max_members: String,
    pub group_type: String,
    pub is_public: bool,
    pub travel_tags: Vec<String>,
}

impl Default for CreateGroupForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            destination: None,
            start_date: String::new(),
            end_date: String::new(),
            budget: String::new(),
            max_members: String::new(),
            group_type: GROUP_TYPES[0].0.to_string(),
            is_public: true,
            travel_tags: Vec::new(),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

impl CreateGroupForm {
    pub fn validate(&self) -> Result<CreateGroupRequest, ValidationError> {
        let destination = self.destination.as_ref().ok_or(ValidationError::MissingDestination)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Err(ValidationError::MissingDates);
        }
        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;
        if start_date >= end_date {
            return Err(ValidationError::EndBeforeStart);
        }
        let members = ValidationError::MemberCount { min: MIN_GROUP_MEMBERS, max: MAX_GROUP_MEMBERS };
        let max_members: u32 = self.max_members.trim().parse().map_err(|_| members.clone())?;
        if !(MIN_GROUP_MEMBERS..=MAX_GROUP_MEMBERS).contains(&max_members) {
            return Err(members);
        }
        let estimated_budget = match self.budget.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
                _ => return Err(ValidationError::InvalidBudget),
            },
        };
        Ok(CreateGroupRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            destination_id: destination.id,
            start_date,
            end_date,
            estimated_budget,
            max_members,
            group_type: self.group_type.clone(),
            is_public: self.is_public,
            travel_tags: self.travel_tags.clone(),
        })
    }
}

// ========================
// Group Search
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    GroupName,
    Creator,
    Destination,
}

impl SearchType {
    pub const ALL: [SearchType; 3] = [Self::GroupName, Self::Creator, Self::Destination];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::GroupName => "groupName",
            Self::Creator => "creator",
            Self::Destination => "destination",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GroupName => "Group name",
            Self::Creator => "Organizer",
            Self::Destination => "Destination",
        }
    }

    pub fn from_param(raw: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.as_param() == raw).unwrap_or_default()
    }
}

/// Discover-tab search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub search_type: SearchType,
    pub start_date: String,
    pub end_date: String,
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

impl SearchQuery {
    /// Any criterion set means the search endpoint is used
    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty() || !self.start_date.is_empty() || !self.end_date.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        let text = self.text.trim();
        if !text.is_empty() {
            params.push(format!("searchText={}", encode(text)));
            params.push(format!("searchType={}", self.search_type.as_param()));
        }
        if !self.start_date.is_empty() {
            params.push(format!("startDate={}", encode(&self.start_date)));
        }
        if !self.end_date.is_empty() {
            params.push(format!("endDate={}", encode(&self.end_date)));
        }
        params.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CreateGroupForm {
        CreateGroupForm {
            title: "  Yunnan loop ".into(),
            destination: Some(Destination { id: 11, name: "Dali".into(), description: None, image_url: None }),
            start_date: "2025-07-01".into(),
            end_date: "2025-07-08".into(),
            max_members: "5".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tag_selection_limit() {
        let mut sel = TagSelection::new(2);
        sel.toggle("beach").unwrap();
        sel.toggle("food").unwrap();
        assert_eq!(sel.toggle("hiking"), Err(ValidationError::TooManyTags { max: 2 }));
        assert_eq!(sel.selected(), ["beach", "food"]);
        sel.toggle("beach").unwrap();
        sel.toggle("hiking").unwrap();
        assert_eq!(sel.selected(), ["food", "hiking"]);
    }

    #[test]
    fn test_tag_selection_confirm_requires_one() {
        let mut sel = TagSelection::new(10);
        assert_eq!(sel.confirm(), Err(ValidationError::NoTags));
        sel.toggle("food").unwrap();
        assert_eq!(sel.confirm().unwrap(), vec!["food".to_string()]);
    }

    #[test]
    fn test_application_requires_message() {
        assert_eq!(validate_application("   ", &[]), Err(ValidationError::EmptyMessage));
        let long = "x".repeat(MAX_APPLICATION_MESSAGE + 1);
        assert!(matches!(validate_application(&long, &[]), Err(ValidationError::MessageTooLong { .. })));
        let req = validate_application("hello", &["a".into(), "b".into()]).unwrap();
        assert_eq!(req.preferences, "a,b");
    }

    #[test]
    fn test_create_form_valid() {
        let req = filled_form().validate().unwrap();
        assert_eq!(req.title, "Yunnan loop");
        assert_eq!(req.destination_id, 11);
        assert_eq!(req.max_members, 5);
        assert_eq!(req.estimated_budget, None);
        assert_eq!(req.group_type, "自由行");
    }

    #[test]
    fn test_create_form_rejections() {
        let mut f = filled_form();
        f.destination = None;
        assert_eq!(f.validate(), Err(ValidationError::MissingDestination));

        let mut f = filled_form();
        f.title = " ".into();
        assert_eq!(f.validate(), Err(ValidationError::MissingTitle));

        let mut f = filled_form();
        f.end_date.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingDates));

        let mut f = filled_form();
        f.end_date = "2025-07-01".into();
        assert_eq!(f.validate(), Err(ValidationError::EndBeforeStart));

        for bad in ["1", "11", "", "many"] {
            let mut f = filled_form();
            f.max_members = bad.into();
            assert!(matches!(f.validate(), Err(ValidationError::MemberCount { .. })), "{bad}");
        }

        let mut f = filled_form();
        f.budget = "-5".into();
        assert_eq!(f.validate(), Err(ValidationError::InvalidBudget));
    }

    #[test]
    fn test_create_form_budget() {
        let mut f = filled_form();
        f.budget = "3500.5".into();
        assert_eq!(f.validate().unwrap().estimated_budget, Some(3500.5));
    }

    #[test]
    fn test_search_query_string() {
        let q = SearchQuery::default();
        assert!(!q.is_active());
        assert_eq!(q.to_query_string(), "");

        let q = SearchQuery {
            text: " 大理 trip ".into(),
            search_type: SearchType::Destination,
            start_date: "2025-07-01".into(),
            end_date: String::new(),
        };
        assert!(q.is_active());
        assert_eq!(
            q.to_query_string(),
            "searchText=%E5%A4%A7%E7%90%86%20trip&searchType=destination&startDate=2025%2D07%2D01"
        );
    }

    #[test]
    fn test_search_type_param_round_trip() {
        for t in SearchType::ALL {
            assert_eq!(SearchType::from_param(t.as_param()), t);
        }
        assert_eq!(SearchType::from_param("bogus"), SearchType::GroupName);
    }
}
