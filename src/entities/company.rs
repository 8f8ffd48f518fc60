use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    entities::{Resource, contact::Contact, invoice::Invoice},
    utils::date_format::datetime_option,
};

/// A customer, vendor, or the account holder's own company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub company_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    /// Primary key of this company in the originating financial system.
    pub erp_key: Option<String>,
    pub company_name: Option<String>,
    /// e.g. `Customer`, `Vendor`, `Group`, `Companyprofile`.
    pub company_type: Option<String>,
    pub company_status: Option<String>,
    pub parent_company_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub default_currency_code: Option<String>,
    pub company_logo_url: Option<String>,
    pub primary_contact_id: Option<Uuid>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,
    pub tax_id: Option<String>,
    pub duns_number: Option<String>,
    pub ap_email_address: Option<String>,
    pub ar_email_address: Option<String>,
    pub domain_name: Option<String>,
    pub company_classification_code: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub app_enrollment_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,

    /// Filled when requested with `include=Contacts`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    /// Filled when requested with `include=Invoices`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<Invoice>>,
}

impl Resource for Company {
    const PATH: &'static str = "Companies";
}
