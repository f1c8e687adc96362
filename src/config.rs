//! Application Configuration
//!
//! Compile-time overrides plus the UI limits shared by forms and views.

/// Backend prefix; override with `GROUP_TRAVEL_API_BASE` at build time
pub const DEFAULT_API_BASE: &str = "/api";

/// Log level; override with `GROUP_TRAVEL_LOG_LEVEL` at build time
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// localStorage slot holding the transfer station list
pub const STAGING_SLOT: &str = "transferStationAttractions";

/// Max preference tags when asking for recommendations
pub const MAX_RECOMMENDATION_TAGS: usize = 10;

/// Max preference tags attached to a join application
pub const MAX_APPLICATION_TAGS: usize = 8;

/// Max travel tags on a new group
pub const MAX_GROUP_TAGS: usize = 10;

/// Max length of a join application message (chars)
pub const MAX_APPLICATION_MESSAGE: usize = 300;

/// Allowed group size when creating a group
pub const MIN_GROUP_MEMBERS: u32 = 2;
pub const MAX_GROUP_MEMBERS: u32 = 10;

/// Wait before re-fetching after an application is processed (ms)
pub const REFRESH_DELAY_MS: u32 = 500;

/// Debounce for destination search in the create form (ms)
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Description preview length in the transfer station (chars)
pub const DESCRIPTION_PREVIEW: usize = 50;

/// Login page; 401 responses redirect here
pub const LOGIN_PATH: &str = "/login";

pub fn api_base() -> &'static str {
    option_env!("GROUP_TRAVEL_API_BASE")
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

pub fn log_level() -> log::Level {
    parse_log_level(option_env!("GROUP_TRAVEL_LOG_LEVEL"))
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Join the API base and a path starting with `/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base().trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("debug")), log::Level::Debug);
        assert_eq!(parse_log_level(Some("WARN")), log::Level::Warn);
        assert_eq!(parse_log_level(Some("chatty")), log::Level::Info);
        assert_eq!(parse_log_level(None), log::Level::Info);
    }

    #[test]
    fn test_api_url_joins_once() {
        let url = api_url("/group-travel/public");
        assert!(url.ends_with("/group-travel/public"));
        assert!(!url.contains("//group-travel"));
    }
}
