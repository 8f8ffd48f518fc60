use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    entities::Resource,
    utils::{
        date_format::{date_only_option, datetime_option},
        decimal_format,
    },
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub payment_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub erp_key: Option<String>,
    /// e.g. `AR Payment`, `AP Payment`.
    pub payment_type: Option<String>,
    /// e.g. `Cash`, `Check`, `Credit Card`, `ACH`.
    pub tender_type: Option<String>,
    pub is_open: Option<bool>,
    pub memo_text: Option<String>,
    #[serde(with = "date_only_option")]
    pub payment_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub post_date: Option<Date>,
    #[serde(with = "decimal_format::option")]
    pub payment_amount: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub unapplied_amount: Option<Decimal>,
    pub currency_code: Option<String>,
    pub reference_code: Option<String>,
    pub app_enrollment_id: Option<Uuid>,
    pub is_voided: Option<bool>,
    pub in_dispute: Option<bool>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,

    /// Filled when requested with `include=Applications`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<PaymentApplied>>,
}

impl Resource for Payment {
    const PATH: &'static str = "Payments";
}

impl Payment {
    /// Sum of the amounts applied to invoices, when applications were included.
    #[must_use]
    pub fn applied_total(&self) -> Option<Decimal> {
        self.applications.as_ref().map(|applications| {
            applications
                .iter()
                .filter_map(|a| a.payment_applied_amount)
                .sum()
        })
    }
}

/// One application of a payment against an invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentApplied {
    pub payment_applied_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub entry_number: Option<i32>,
    #[serde(with = "date_only_option")]
    pub apply_to_invoice_date: Option<Date>,
    #[serde(with = "decimal_format::option")]
    pub payment_applied_amount: Option<Decimal>,
    pub app_enrollment_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,
}
