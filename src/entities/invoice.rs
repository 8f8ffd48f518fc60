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

/// An invoice, credit memo or similar receivable/payable document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub invoice_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub purchase_order_code: Option<String>,
    pub reference_code: Option<String>,
    pub salesperson_code: Option<String>,
    pub salesperson_name: Option<String>,
    /// e.g. `AR Invoice`, `AP Invoice`, `AR Credit Memo`.
    pub invoice_type_code: Option<String>,
    /// e.g. `Open`, `Partially Paid`, `Paid`, `Closed`.
    pub invoice_status_code: Option<String>,
    pub terms_code: Option<String>,
    pub special_terms: Option<String>,
    pub currency_code: Option<String>,

    #[serde(with = "decimal_format::option")]
    pub total_amount: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub sales_tax_amount: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub discount_amount: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub outstanding_balance_amount: Option<Decimal>,

    #[serde(with = "date_only_option")]
    pub invoice_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub discount_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub posted_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub invoice_closed_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub payment_due_date: Option<Date>,
    #[serde(with = "date_only_option")]
    pub imported_date: Option<Date>,

    pub primary_origin_address_id: Option<Uuid>,
    pub primary_bill_to_address_id: Option<Uuid>,
    pub primary_ship_to_address_id: Option<Uuid>,
    pub app_enrollment_id: Option<Uuid>,
    pub is_voided: Option<bool>,
    pub in_dispute: Option<bool>,
    pub exclude_from_aging: Option<bool>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,

    /// Filled when requested with `include=Lines`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<InvoiceLine>>,
    /// Filled when requested with `include=Payments`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<InvoicePayment>>,
}

impl Resource for Invoice {
    const PATH: &'static str = "Invoices";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceLine {
    pub invoice_line_id: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub erp_key: Option<String>,
    pub line_number: Option<String>,
    pub item_code: Option<String>,
    pub description: Option<String>,
    pub unit_measure_code: Option<String>,
    #[serde(with = "decimal_format::option")]
    pub unit_price: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub quantity: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub quantity_shipped: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub quantity_received: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub total_amount: Option<Decimal>,
    pub exemption_code: Option<String>,
    #[serde(with = "date_only_option")]
    pub reporting_date: Option<Date>,
    pub override_origin_address_id: Option<Uuid>,
    pub override_bill_to_address_id: Option<Uuid>,
    pub override_ship_to_address_id: Option<Uuid>,
    pub app_enrollment_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub created: Option<OffsetDateTime>,
    pub created_user_id: Option<Uuid>,
    #[serde(with = "datetime_option")]
    pub modified: Option<OffsetDateTime>,
    pub modified_user_id: Option<Uuid>,
}

/// A payment as seen from the invoice it was applied to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoicePayment {
    pub group_key: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub payment_applied_id: Option<Uuid>,
    pub reference_code: Option<String>,
    #[serde(with = "date_only_option")]
    pub apply_to_invoice_date: Option<Date>,
    #[serde(with = "decimal_format::option")]
    pub payment_applied_amount: Option<Decimal>,
    #[serde(with = "date_only_option")]
    pub payment_date: Option<Date>,
    #[serde(with = "decimal_format::option")]
    pub payment_amount: Option<Decimal>,
    #[serde(with = "decimal_format::option")]
    pub unapplied_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn reads_sparse_invoice() {
        let invoice: Invoice = serde_json::from_value(json!({
            "invoiceId": "5c8b3c56-3f3a-4a7d-9e2e-7d0f8b1c2a11",
            "invoiceStatusCode": "Partially Paid",
            "totalAmount": 1234.56,
            "outstandingBalanceAmount": null,
            "invoiceDate": "2023-03-01",
            "paymentDueDate": "2023-03-31T00:00:00",
            "lines": [{ "lineNumber": "1", "quantity": 2, "unitPrice": 617.28 }]
        }))
        .unwrap();

        assert_eq!(invoice.invoice_status_code.as_deref(), Some("Partially Paid"));
        assert_eq!(invoice.total_amount, Some(dec!(1234.56)));
        assert_eq!(invoice.outstanding_balance_amount, None);
        assert_eq!(invoice.invoice_date, Some(date!(2023 - 03 - 01)));
        assert_eq!(invoice.payment_due_date, Some(date!(2023 - 03 - 31)));
        assert_eq!(invoice.customer_id, None);

        let lines = invoice.lines.unwrap();
        assert_eq!(lines[0].quantity, Some(dec!(2)));
        assert_eq!(lines[0].unit_price, Some(dec!(617.28)));
    }

    #[test]
    fn writes_dates_without_time_and_omits_unrequested_collections() {
        let invoice = Invoice {
            invoice_date: Some(date!(2023 - 03 - 01)),
            total_amount: Some(dec!(99.90)),
            ..Default::default()
        };
        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["invoiceDate"], json!("2023-03-01"));
        assert_eq!(value["postedDate"], json!(null));
        assert_eq!(value["totalAmount"].to_string(), "99.90");
        assert!(value.get("lines").is_none());
        assert!(value.get("payments").is_none());
    }
}
