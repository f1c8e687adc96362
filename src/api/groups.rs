//! Group Endpoints

use super::{request_ack, request_data, Method, NO_BODY};
use crate::error::ApiError;
use crate::forms::SearchQuery;
use crate::models::{CreateGroupRequest, PreferenceRequest, StatusUpdate, TravelGroup, UserGroupStatus};

pub async fn list_public_groups() -> Result<Vec<TravelGroup>, ApiError> {
    request_data(Method::Get, "/group-travel/public", NO_BODY).await
}

pub async fn search_public_groups(query: &SearchQuery) -> Result<Vec<TravelGroup>, ApiError> {
    let path = format!("/group-travel/public/search?{}", query.to_query_string());
    request_data(Method::Get, &path, NO_BODY).await
}

/// Public list, or the search endpoint when any criterion is set
pub async fn discover_groups(query: &SearchQuery) -> Result<Vec<TravelGroup>, ApiError> {
    if query.is_active() {
        search_public_groups(query).await
    } else {
        list_public_groups().await
    }
}

pub async fn get_group(group_id: i64) -> Result<TravelGroup, ApiError> {
    request_data(Method::Get, &format!("/group-travel/{}", group_id), NO_BODY).await
}

pub async fn create_group(req: &CreateGroupRequest) -> Result<TravelGroup, ApiError> {
    log::info!("[API] creating group {:?}", req.title);
    request_data(Method::Post, "/group-travel", Some(req)).await
}

pub async fn my_created_groups() -> Result<Vec<TravelGroup>, ApiError> {
    request_data(Method::Get, "/group-travel/my-created", NO_BODY).await
}

pub async fn my_joined_groups() -> Result<Vec<TravelGroup>, ApiError> {
    request_data(Method::Get, "/group-travel/my-joined", NO_BODY).await
}

pub async fn recommended_groups() -> Result<Vec<TravelGroup>, ApiError> {
    request_data(Method::Get, "/group-travel/recommendations", NO_BODY).await
}

pub async fn recommendations_by_preferences(preferences: &[String]) -> Result<Vec<TravelGroup>, ApiError> {
    let body = PreferenceRequest { preferences };
    request_data(Method::Post, "/group-travel/recommendations-by-preferences", Some(&body)).await
}

/// Returns the group as updated by the server
pub async fn update_group_status(group_id: i64, status: &str) -> Result<TravelGroup, ApiError> {
    log::info!("[API] group {} -> {}", group_id, status);
    let body = StatusUpdate { status };
    request_data(Method::Put, &format!("/group-travel/{}/status", group_id), Some(&body)).await
}

pub async fn user_group_status(group_id: i64) -> Result<UserGroupStatus, ApiError> {
    request_data(Method::Get, &format!("/group-travel/{}/user-status", group_id), NO_BODY).await
}

pub async fn leave_group(group_id: i64) -> Result<(), ApiError> {
    log::info!("[API] leaving group {}", group_id);
    request_ack(Method::Post, &format!("/group-travel/{}/leave", group_id), NO_BODY).await
}
