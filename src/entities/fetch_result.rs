use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned},
    ser::SerializeStruct,
};

use crate::error::{Error, Result};

/// Page metadata of a paginated query.
///
/// `pageSize` and `pageNumber` travel together on the wire; holding them in
/// one value makes "one without the other" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    /// Number of records requested per page.
    pub size: u32,
    /// Index of the returned page. Lockstep numbers pages from zero.
    pub number: u32,
}

/// The envelope every Lockstep query endpoint returns.
///
/// ```json
/// { "totalCount": 57, "pageSize": 25, "pageNumber": 0, "records": [ ... ] }
/// ```
///
/// `records` is required: a body without it is a contract violation and
/// fails to deserialize, it is never read as an empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult<T> {
    /// Total rows matching the filter, independent of pagination, when the
    /// server computed it.
    pub total_count: Option<u64>,
    /// Present only when page-based pagination was requested.
    pub page: Option<Page>,
    /// The returned rows, in server order.
    pub records: Vec<T>,
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        Self {
            total_count: None,
            page: None,
            records: Vec::new(),
        }
    }
}

impl<T> FetchResult<T> {
    #[must_use]
    pub fn page_size(&self) -> Option<u32> {
        self.page.map(|p| p.size)
    }

    #[must_use]
    pub fn page_number(&self) -> Option<u32> {
        self.page.map(|p| p.number)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Whether a following page may hold more rows.
    ///
    /// Returns `None` when the answer cannot be computed, i.e. the server did
    /// not return a total count or the query was not paginated.
    #[must_use]
    pub fn has_more(&self) -> Option<bool> {
        let total = self.total_count?;
        let page = self.page?;
        let seen = (u64::from(page.number) + 1) * u64::from(page.size);
        Some(seen < total)
    }

    /// Converts the records while keeping the pagination metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> FetchResult<U>
    where
        F: FnMut(T) -> U,
    {
        FetchResult {
            total_count: self.total_count,
            page: self.page,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

impl<T: DeserializeOwned> FetchResult<T> {
    /// Decodes a response body, reporting any shape mismatch (including a
    /// missing `records` member) as [`Error::MalformedResponse`].
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| Error::malformed::<Self>(e, None, Some(body.to_string())))
    }
}

impl<T> IntoIterator for FetchResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FetchResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchResultWire<T> {
    #[serde(default)]
    total_count: Option<u64>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    page_number: Option<u32>,
    records: Vec<T>,
}

impl<'de, T> Deserialize<'de> for FetchResult<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = FetchResultWire::<T>::deserialize(deserializer)?;
        let page = match (wire.page_size, wire.page_number) {
            (Some(size), Some(number)) => Some(Page { size, number }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(de::Error::custom("`pageSize` is present without `pageNumber`"));
            }
            (None, Some(_)) => {
                return Err(de::Error::custom("`pageNumber` is present without `pageSize`"));
            }
        };

        Ok(Self {
            total_count: wire.total_count,
            page,
            records: wire.records,
        })
    }
}

impl<T: Serialize> Serialize for FetchResult<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FetchResult", 4)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.serialize_field("pageSize", &self.page_size())?;
        state.serialize_field("pageNumber", &self.page_number())?;
        state.serialize_field("records", &self.records)?;
        state.end()
    }
}
