//! Error Types
//!
//! Transport, validation and storage failures. Display strings are shown to
//! the user as-is, so they are written as sentences.

use thiserror::Error;

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("{message} (HTTP {code})")]
    Status { code: u16, message: String },
    /// Envelope came back with `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message with the failed action named, for blocking notices
    pub fn notice(&self, action: &str) -> String {
        format!("{} failed: {}", action, self)
    }
}

/// Input rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please write a short application message")]
    EmptyMessage,
    #[error("application message is limited to {max} characters")]
    MessageTooLong { max: usize },
    #[error("select at most {max} preference tags")]
    TooManyTags { max: usize },
    #[error("select at least one preference tag")]
    NoTags,
    #[error("please choose a destination")]
    MissingDestination,
    #[error("please enter a group title")]
    MissingTitle,
    #[error("please choose travel dates")]
    MissingDates,
    #[error("dates must use the YYYY-MM-DD format")]
    InvalidDate,
    #[error("end date must be after the start date")]
    EndBeforeStart,
    #[error("group size must be between {min} and {max} members")]
    MemberCount { min: u32, max: u32 },
    #[error("budget must be a non-negative number")]
    InvalidBudget,
}

/// Slot write failure; logged, never shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage write rejected: {0}")]
    Write(String),
    #[error("serialize failed: {0}")]
    Serialize(String),
    #[error("stored list is malformed: {0}")]
    Malformed(String),
}

impl From<gloo_storage::errors::StorageError> for StorageError {
    fn from(err: gloo_storage::errors::StorageError) -> Self {
        use gloo_storage::errors::StorageError as Gloo;
        match err {
            Gloo::SerdeError(e) => StorageError::Malformed(e.to_string()),
            Gloo::KeyNotFound(key) => StorageError::Malformed(format!("missing key {}", key)),
            Gloo::JsError(e) => StorageError::Write(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_names_action() {
        let err = ApiError::Rejected("group is full".into());
        assert_eq!(err.notice("Apply"), "Apply failed: group is full");
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status { code: 500, message: "server error".into() };
        assert_eq!(err.to_string(), "server error (HTTP 500)");
    }

    #[test]
    fn test_storage_error_from_gloo() {
        use gloo_storage::errors::StorageError as Gloo;
        let serde = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        assert!(matches!(StorageError::from(Gloo::SerdeError(serde)), StorageError::Malformed(_)));
        assert_eq!(
            StorageError::from(Gloo::KeyNotFound("slot".into())),
            StorageError::Malformed("missing key slot".into())
        );
    }
}
