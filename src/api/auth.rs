//! Session Endpoints

use super::{request, Method, NO_BODY};
use crate::error::ApiError;
use crate::models::AuthStatus;

pub async fn auth_status() -> Result<AuthStatus, ApiError> {
    request(Method::Get, "/auth/status", NO_BODY).await
}

/// Signed-in user id, `None` when logged out or unreachable
pub async fn current_user_id() -> Option<i64> {
    match auth_status().await {
        Ok(status) if status.success => status.user_id,
        Ok(_) => None,
        Err(e) => {
            log::warn!("[API] auth status unavailable: {}", e);
            None
        }
    }
}
