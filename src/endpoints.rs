use std::fmt;

use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Version prefix of every Lockstep API path.
pub const API_PREFIX: &str = "api/v1/";

/// A typed representation of Lockstep API endpoints.
///
/// Collection names come from [`crate::entities::Resource::PATH`], so one
/// variant covers every record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockstepEndpoint {
    /// `api/v1/{collection}`: create records.
    Collection(&'static str),
    /// `api/v1/{collection}/{id}`: retrieve, update or delete one record.
    Record(&'static str, Uuid),
    /// `api/v1/{collection}/query`: filtered, paginated listing.
    Query(&'static str),
    /// `api/v1/Reports/aging`
    AgingReport,
    /// `api/v1/Status`
    Status,
    /// Any other path under `api/v1/`, given as segments. Collections this
    /// crate has no typed API for are reached by passing this to
    /// [`crate::Client::get`] and friends.
    Custom(Vec<String>),
}

impl LockstepEndpoint {
    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> String {
        let rest = match self {
            Self::Collection(collection) => (*collection).to_string(),
            Self::Record(collection, id) => format!("{collection}/{id}"),
            Self::Query(collection) => format!("{collection}/query"),
            Self::AgingReport => "Reports/aging".to_string(),
            Self::Status => "Status".to_string(),
            Self::Custom(components) => components.join("/"),
        };
        format!("{API_PREFIX}{rest}")
    }

    /// Joins the endpoint onto `base`, which must end with `/`.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        base.join(&self.path()).map_err(|_| Error::InvalidEndpoint)
    }
}

impl fmt::Display for LockstepEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_lockstep_paths() {
        let base = Url::parse("https://api.sbx.lockstep.io/").unwrap();
        let id = Uuid::nil();

        assert_eq!(
            LockstepEndpoint::Query("Invoices").to_url(&base).unwrap().as_str(),
            "https://api.sbx.lockstep.io/api/v1/Invoices/query"
        );
        assert_eq!(
            LockstepEndpoint::Record("Payments", id).to_url(&base).unwrap().as_str(),
            format!("https://api.sbx.lockstep.io/api/v1/Payments/{id}")
        );
        assert_eq!(
            LockstepEndpoint::AgingReport.to_string(),
            "api/v1/Reports/aging"
        );
        assert_eq!(
            LockstepEndpoint::Custom(vec!["Sync".into(), "query".into()]).path(),
            "api/v1/Sync/query"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let base = Url::parse("http://127.0.0.1:9000/proxy/").unwrap();
        assert_eq!(
            LockstepEndpoint::Status.to_url(&base).unwrap().as_str(),
            "http://127.0.0.1:9000/proxy/api/v1/Status"
        );
    }
}
