use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::decimal_format;

/// One bucket of an accounts-receivable aging report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Aging {
    pub group_key: Option<Uuid>,
    /// Upper bound of the bucket in days past due; `0` is "current".
    pub bucket: Option<i32>,
    pub currency_code: Option<String>,
    #[serde(with = "decimal_format::option")]
    pub outstanding_balance: Option<Decimal>,
}

/// Query parameters of the aging report.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgingParameters {
    /// Restrict the report to one company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
    /// Force the server to recompute instead of returning cached figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recalculate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_provider: Option<String>,
    /// Comma separated bucket bounds, e.g. `0,30,60,90`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<String>,
}

impl AgingParameters {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_company(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    #[must_use]
    pub fn with_recalculate(mut self, recalculate: bool) -> Self {
        self.recalculate = Some(recalculate);
        self
    }

    #[must_use]
    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    #[must_use]
    pub fn with_currency_provider(mut self, provider: impl Into<String>) -> Self {
        self.currency_provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn with_buckets(mut self, buckets: &[i32]) -> Self {
        let joined = buckets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.buckets = Some(joined);
        self
    }
}
