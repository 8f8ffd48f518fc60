use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{entities::Resource, utils::date_format::datetime_option};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WebhookStatus {
    Active,
    Inactive,
    Errored,
    Other(String),
}

impl WebhookStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Errored => "Errored",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for WebhookStatus {
    fn from(code: &str) -> Self {
        match code {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            "Errored" => Self::Errored,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A callback registration notified when platform data changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    pub webhook_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub name: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    /// Only returned once, when the webhook is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub request_content_type: Option<String>,
    pub callback_http_method: Option<String>,
    pub callback_url: Option<String>,
    #[serde(with = "datetime_option")]
    pub expiration_date: Option<OffsetDateTime>,
    pub retry_count: Option<i32>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,
}

impl Webhook {
    #[must_use]
    pub fn status(&self) -> Option<WebhookStatus> {
        self.status_code.as_deref().map(WebhookStatus::from)
    }
}

impl Resource for Webhook {
    const PATH: &'static str = "Webhooks";
}
