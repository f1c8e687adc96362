//! Destination Endpoints
//!
//! These reply with a bare page, not an envelope.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{request, Method, NO_BODY};
use crate::error::ApiError;
use crate::models::{Destination, Page};

pub async fn hot_destinations() -> Result<Vec<Destination>, ApiError> {
    let page: Page<Destination> = request(Method::Get, "/destinations/hot", NO_BODY).await?;
    Ok(page.content)
}

pub async fn search_destinations(keyword: &str) -> Result<Vec<Destination>, ApiError> {
    let path = search_path(keyword);
    let page: Page<Destination> = request(Method::Get, &path, NO_BODY).await?;
    Ok(page.content)
}

/// Tag vocabulary offered when creating a group
pub async fn destination_tags() -> Result<Vec<String>, ApiError> {
    request(Method::Get, "/destinations/tags", NO_BODY).await
}

fn search_path(keyword: &str) -> String {
    format!(
        "/destinations/search?keyword={}",
        utf8_percent_encode(keyword.trim(), NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_path_encodes_keyword() {
        assert_eq!(search_path(" 大理 "), "/destinations/search?keyword=%E5%A4%A7%E7%90%86");
        assert_eq!(search_path("a&b"), "/destinations/search?keyword=a%26b");
    }
}
