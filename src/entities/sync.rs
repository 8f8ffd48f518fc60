use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{entities::Resource, utils::date_format::datetime_option};

/// Typed view of a sync request's `statusCode`.
///
/// The server owns this vocabulary; values this client does not know are
/// kept verbatim in [`SyncStatus::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyncStatus {
    Ready,
    InProgress,
    Cancelled,
    Failed,
    Success,
    Other(String),
}

impl SyncStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::InProgress => "In Progress",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Failed",
            Self::Success => "Success",
            Self::Other(code) => code,
        }
    }

    /// True once the server will no longer change this request.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed | Self::Success)
    }
}

impl From<&str> for SyncStatus {
    fn from(code: &str) -> Self {
        match code {
            "Ready" => Self::Ready,
            "In Progress" => Self::InProgress,
            "Cancelled" => Self::Cancelled,
            "Failed" => Self::Failed,
            "Success" => Self::Success,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to pull data from a connected financial system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncRequest {
    pub sync_request_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub status_code: Option<String>,
    pub process_result_message: Option<String>,
    pub app_enrollment_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,
    /// Per-entity results, filled when requested with `include=Details`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SyncRequest {
    #[must_use]
    pub fn status(&self) -> Option<SyncStatus> {
        self.status_code.as_deref().map(SyncStatus::from)
    }
}

impl Resource for SyncRequest {
    const PATH: &'static str = "Sync";
}

/// Body of a new sync submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSubmit {
    pub app_enrollment_id: Uuid,
}
