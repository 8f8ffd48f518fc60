use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::utils::date_format::datetime_option;

/// Result of pinging the API with the configured credentials.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    pub user_name: Option<String>,
    pub account_name: Option<String>,
    pub account_company_id: Option<Uuid>,
    pub logged_in: Option<bool>,
    pub error_message: Option<String>,
    pub roles: Option<Vec<String>>,
    #[serde(with = "datetime_option")]
    pub last_logged_in: Option<OffsetDateTime>,
    pub api_key_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub onboarding_scheduled: Option<bool>,
    pub environment: Option<String>,
    pub version: Option<String>,
}
