//! Travel Tag Endpoint

use super::{request_optional, Method, NO_BODY};
use crate::error::ApiError;
use crate::models::{TravelTag, DEFAULT_TRAVEL_TAGS};

pub async fn list_travel_tags() -> Result<Vec<String>, ApiError> {
    let tags: Option<Vec<TravelTag>> = request_optional(Method::Get, "/tags", NO_BODY).await?;
    Ok(tags.unwrap_or_default().into_iter().map(TravelTag::into_name).collect())
}

/// Server tags, or the built-in list when the call fails or returns none
pub async fn travel_tags_or_default() -> Vec<String> {
    let tags = list_travel_tags().await.unwrap_or_else(|e| {
        log::warn!("[API] tag list unavailable, using defaults: {}", e);
        Vec::new()
    });
    with_default_tags(tags)
}

fn with_default_tags(tags: Vec<String>) -> Vec<String> {
    if tags.is_empty() {
        DEFAULT_TRAVEL_TAGS.iter().map(|t| t.to_string()).collect()
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags_fill_empty_list() {
        assert_eq!(with_default_tags(vec![]).len(), DEFAULT_TRAVEL_TAGS.len());
        assert_eq!(with_default_tags(vec!["food".into()]), vec!["food".to_string()]);
    }
}
