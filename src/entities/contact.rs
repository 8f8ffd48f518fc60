use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{entities::Resource, utils::date_format::datetime_option};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub erp_key: Option<String>,
    pub contact_name: Option<String>,
    pub contact_code: Option<String>,
    pub title: Option<String>,
    pub role_code: Option<String>,
    pub email_address: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state_region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub is_active: Option<bool>,
    pub webpage_url: Option<String>,
    pub picture_url: Option<String>,
    pub app_enrollment_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,
}

impl Resource for Contact {
    const PATH: &'static str = "Contacts";
}
