use serde::Serialize;

use crate::entities::Page;

/// Parameters accepted by every `.../query` endpoint.
///
/// Filter and order use Lockstep's Searchlight syntax, e.g.
/// `invoiceDate ge 2023-01-01 AND outstandingBalanceAmount gt 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Comma separated related collections to embed, e.g. `Lines,Payments`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    // Only set together, through `with_page`.
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_number: Option<u32>,
}

impl QueryParameters {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_include(mut self, collections: &[&str]) -> Self {
        self.include = Some(collections.join(","));
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Requests one page of `size` records. Pages are numbered from zero.
    #[must_use]
    pub fn with_page(mut self, size: u32, number: u32) -> Self {
        self.page_size = Some(size);
        self.page_number = Some(number);
        self
    }

    #[must_use]
    pub fn page(&self) -> Option<Page> {
        match (self.page_size, self.page_number) {
            (Some(size), Some(number)) => Some(Page { size, number }),
            _ => None,
        }
    }

    /// The same query, one page further. `None` when not paginated.
    #[must_use]
    pub fn next_page(&self) -> Option<Self> {
        let page = self.page()?;
        Some(self.clone().with_page(page.size, page.number + 1))
    }
}

/// The `include` parameter of single-record endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct IncludeParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

impl IncludeParameter {
    pub(crate) fn new(collections: &[&str]) -> Self {
        Self {
            include: (!collections.is_empty()).then(|| collections.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_members_are_set_together() {
        let params = QueryParameters::builder()
            .with_filter("isOpen eq true")
            .with_page(50, 0);
        assert_eq!(params.page(), Some(Page { size: 50, number: 0 }));

        let next = params.next_page().unwrap();
        assert_eq!(next.page(), Some(Page { size: 50, number: 1 }));
        assert_eq!(next.filter.as_deref(), Some("isOpen eq true"));

        assert!(QueryParameters::default().next_page().is_none());
    }

    #[test]
    fn include_is_comma_joined() {
        let params = QueryParameters::builder().with_include(&["Lines", "Payments"]);
        assert_eq!(params.include.as_deref(), Some("Lines,Payments"));
        assert_eq!(IncludeParameter::new(&[]).include, None);
    }
}
