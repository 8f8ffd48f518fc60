use serde::{Serialize, de::DeserializeOwned};

pub mod aging;
pub mod company;
pub mod contact;
pub mod fetch_result;
pub mod invoice;
pub mod payment;
pub mod status;
pub mod sync;
pub mod webhook;

pub use fetch_result::{FetchResult, Page};

/// A record type served from a collection under `api/v1/`.
///
/// Implementors get query, retrieve, create, update and delete through
/// [`crate::client::ResourceApi`].
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path segment, e.g. `Invoices`.
    const PATH: &'static str;
}
