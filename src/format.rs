//! Display Formatting
//!
//! Small text helpers used by cards, the detail page and the transfer station.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{api_base, DESCRIPTION_PREVIEW};

pub const IMAGE_PLACEHOLDER: &str = "/images/placeholder.png";

pub fn format_budget(budget: Option<f64>) -> String {
    match budget {
        Some(b) if b > 0.0 => format!("¥{}", b.round() as i64),
        _ => "To be discussed".to_string(),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "TBD".to_string())
}

/// "07-01 → 07-08" on cards
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{} → {}", s.format("%m-%d"), e.format("%m-%d")),
        _ => "Dates TBD".to_string(),
    }
}

pub fn format_timestamp(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Colour class for a compatibility score
pub fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "score-high"
    } else if score >= 60.0 {
        "score-medium"
    } else {
        "score-low"
    }
}

pub fn format_score(score: f64) -> String {
    format!("{}%", score.round() as i64)
}

/// Resolve an image reference against an API base
pub fn resolve_image_url_with(image_ref: &str, base: &str) -> String {
    let image_ref = image_ref.trim();
    if image_ref.is_empty() {
        return IMAGE_PLACEHOLDER.to_string();
    }
    if image_ref.starts_with("http://") || image_ref.starts_with("https://") || image_ref.starts_with("data:") {
        return image_ref.to_string();
    }
    let base = base.trim_end_matches('/');
    if image_ref.starts_with('/') {
        format!("{}{}", base, image_ref)
    } else {
        format!("{}/images/{}", base, image_ref)
    }
}

pub fn resolve_image_url(image_ref: &str) -> String {
    resolve_image_url_with(image_ref, api_base())
}

/// First `DESCRIPTION_PREVIEW` chars, with an ellipsis when cut
pub fn truncate_description(text: &str) -> String {
    truncate_chars(text, DESCRIPTION_PREVIEW)
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Itinerary editor page opened from a group
pub fn itinerary_href(itinerary_id: i64, group_id: i64) -> String {
    format!("/edit-itinerary/{}?from=group&groupId={}", itinerary_id, group_id)
}

/// First character, used as an avatar fallback
pub fn initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget() {
        assert_eq!(format_budget(None), "To be discussed");
        assert_eq!(format_budget(Some(0.0)), "To be discussed");
        assert_eq!(format_budget(Some(3000.0)), "¥3000");
        assert_eq!(format_budget(Some(1999.6)), "¥2000");
    }

    #[test]
    fn test_dates() {
        let s = NaiveDate::from_ymd_opt(2025, 7, 1);
        let e = NaiveDate::from_ymd_opt(2025, 7, 8);
        assert_eq!(format_date(s), "2025-07-01");
        assert_eq!(format_date(None), "TBD");
        assert_eq!(format_date_range(s, e), "07-01 → 07-08");
        assert_eq!(format_date_range(s, None), "Dates TBD");
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_class(80.0), "score-high");
        assert_eq!(score_class(79.9), "score-medium");
        assert_eq!(score_class(60.0), "score-medium");
        assert_eq!(score_class(12.0), "score-low");
        assert_eq!(format_score(87.4), "87%");
    }

    #[test]
    fn test_image_resolution() {
        assert_eq!(resolve_image_url_with("https://cdn.x/a.jpg", "/api"), "https://cdn.x/a.jpg");
        assert_eq!(resolve_image_url_with("/uploads/a.jpg", "/api/"), "/api/uploads/a.jpg");
        assert_eq!(resolve_image_url_with("a.jpg", "/api"), "/api/images/a.jpg");
        assert_eq!(resolve_image_url_with("  ", "/api"), IMAGE_PLACEHOLDER);
    }

    #[test]
    fn test_truncate_counts_chars() {
        let short = "洱海骑行";
        assert_eq!(truncate_chars(short, 10), short);
        assert_eq!(truncate_chars("洱海骑行环线", 4), "洱海骑行...");
        let long = "a".repeat(DESCRIPTION_PREVIEW + 5);
        assert_eq!(truncate_description(&long).len(), DESCRIPTION_PREVIEW + 3);
    }

    #[test]
    fn test_itinerary_href() {
        assert_eq!(itinerary_href(12, 7), "/edit-itinerary/12?from=group&groupId=7");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("lin"), "L");
        assert_eq!(initial(""), "?");
    }
}
