//! Group Itinerary Endpoints

use super::{request_data, request_optional, Method, NO_BODY};
use crate::error::ApiError;
use crate::models::{CreateItineraryRequest, GroupItinerary, TravelGroup};

/// `Ok(None)` while the group has no itinerary yet
pub async fn get_group_itinerary(group_id: i64) -> Result<Option<GroupItinerary>, ApiError> {
    request_optional(Method::Get, &format!("/group-travel/{}/itinerary", group_id), NO_BODY).await
}

pub async fn create_group_itinerary(group: &TravelGroup) -> Result<GroupItinerary, ApiError> {
    log::info!("[API] creating itinerary for group {}", group.id);
    let body = CreateItineraryRequest::for_group(group);
    request_data(Method::Post, &format!("/group-travel/{}/itinerary", group.id), Some(&body)).await
}
