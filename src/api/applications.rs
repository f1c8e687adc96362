//! Join Application Endpoints

use super::{request_ack, request_data, Method, NO_BODY};
use crate::error::ApiError;
use crate::models::{ApplyRequest, GroupApplication};

/// Creator's verdict on an application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_param(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
        }
    }
}

pub async fn apply_to_group(group_id: i64, req: &ApplyRequest) -> Result<(), ApiError> {
    log::info!("[API] applying to group {}", group_id);
    request_ack(Method::Post, &format!("/group-travel/{}/apply", group_id), Some(req)).await
}

pub async fn list_applications(group_id: i64) -> Result<Vec<GroupApplication>, ApiError> {
    request_data(Method::Get, &format!("/group-travel/{}/applications", group_id), NO_BODY).await
}

pub async fn process_application(group_id: i64, application_id: i64, decision: Decision) -> Result<(), ApiError> {
    log::info!("[API] {} application {} in group {}", decision.as_param(), application_id, group_id);
    let path = format!(
        "/group-travel/{}/applications/{}/process?action={}",
        group_id,
        application_id,
        decision.as_param()
    );
    request_ack(Method::Post, &path, NO_BODY).await
}

pub async fn withdraw_application(group_id: i64) -> Result<(), ApiError> {
    log::info!("[API] withdrawing application to group {}", group_id);
    request_ack(Method::Post, &format!("/group-travel/{}/applications/withdraw", group_id), NO_BODY).await
}
