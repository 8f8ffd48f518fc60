use core::fmt;
use std::marker::PhantomData;

use reqwest::{
    Method, RequestBuilder, StatusCode,
    header::{self, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing_error::SpanTrace;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::endpoints::LockstepEndpoint;
use crate::entities::{
    FetchResult, Resource,
    aging::{Aging, AgingParameters},
    company::Company,
    contact::Contact,
    invoice::Invoice,
    payment::Payment,
    status::Status,
    sync::{SyncRequest, SyncSubmit},
    webhook::Webhook,
};
use crate::error::{Error, ErrorResult, Result, entity_name};
use crate::query::{IncludeParameter, QueryParameters};

const USER_AGENT: &str = concat!("lockstep-rs/", env!("CARGO_PKG_VERSION"));
/// Header used to attribute requests to the calling application.
const HEADER_APPLICATION_NAME: &str = "applicationname";

/// This is the client that is used for interacting with the Lockstep API. It
/// attaches credentials to every request and turns responses into record
/// models, fetch results or typed errors.
///
/// Cloning is cheap: clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Builds a client for the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let base_url = config.environment.base_url()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let (name, value) = config.credentials.header()?;
        headers.insert(name, value);
        if let Some(application_name) = &config.application_name {
            let value = HeaderValue::from_str(application_name).map_err(|_| {
                Error::Configuration(format!(
                    "application name `{application_name}` is not a valid header value"
                ))
            })?;
            headers.insert(HeaderName::from_static(HEADER_APPLICATION_NAME), value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        debug!(environment = %config.environment, %base_url, "building client");
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Builds a client from `LOCKSTEP_*` environment variables, see
    /// [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request object; credentials and `Accept` come from the default headers.
    pub(crate) fn build_request(&self, method: Method, endpoint: &LockstepEndpoint) -> Result<RequestBuilder> {
        let url = endpoint.to_url(&self.base_url)?;
        Ok(self.http.request(method, url))
    }

    /// Perform an authenticated `GET` request against the API.
    #[instrument(skip(self, query))]
    pub async fn get<R: DeserializeOwned, Q: Serialize + ?Sized + fmt::Debug>(
        &self,
        endpoint: LockstepEndpoint,
        query: &Q,
    ) -> Result<R> {
        trace!(?query, "making GET request");
        let response = self
            .build_request(Method::GET, &endpoint)?
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform an authenticated `POST` request against the API.
    #[instrument(skip(self, data))]
    pub async fn post<R: DeserializeOwned, T: Serialize + ?Sized>(
        &self,
        endpoint: LockstepEndpoint,
        data: &T,
    ) -> Result<R> {
        trace!(json = ?serde_json::to_string(data).ok(), "making POST request");
        let response = self
            .build_request(Method::POST, &endpoint)?
            .json(data)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform an authenticated `PATCH` request against the API.
    #[instrument(skip(self, data))]
    pub async fn patch<R: DeserializeOwned, T: Serialize + ?Sized>(
        &self,
        endpoint: LockstepEndpoint,
        data: &T,
    ) -> Result<R> {
        trace!(json = ?serde_json::to_string(data).ok(), "making PATCH request");
        let response = self
            .build_request(Method::PATCH, &endpoint)?
            .json(data)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform an authenticated `DELETE` request against the API. Any body
    /// returned with a success status is ignored.
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: LockstepEndpoint) -> Result<()> {
        trace!("making DELETE request");
        let response = self
            .build_request(Method::DELETE, &endpoint)?
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let url = response.url().to_string();
            let text = response.text().await?;
            Err(Self::api_error(status, url, text))
        }
    }

    #[instrument(skip(response))]
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let entity_type = entity_name::<T>();

        debug!(%url, %status, %entity_type, "received response");

        let text = response.text().await?;
        debug!("Response body size: {} bytes", text.len());
        trace!("Response text:\n{}", text);

        if !status.is_success() {
            return Err(Self::api_error(status, url, text));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(
                "Failed to deserialize {} response: {}, near column {}: {}",
                entity_type,
                e,
                e.column(),
                text.chars()
                    .skip(e.column().saturating_sub(30))
                    .take(100)
                    .collect::<String>()
            );
            Error::malformed::<T>(e, Some(url), Some(text))
        })
    }

    /// Turns a non-success response into [`Error::Api`], reading the body as
    /// problem details on a best-effort basis.
    fn api_error(status_code: StatusCode, url: String, text: String) -> Error {
        let body = if text.trim().is_empty() {
            ErrorResult::default()
        } else {
            serde_json::from_str::<ErrorResult>(&text).unwrap_or_else(|e| {
                warn!(%status_code, "error body is not problem details JSON: {e}");
                ErrorResult::default()
            })
        };

        if status_code.is_server_error() {
            error!(%status_code, %url, %body, "Lockstep API server error");
        } else {
            warn!(%status_code, %url, %body, "Lockstep API rejected request");
        }

        Error::Api {
            status_code,
            url,
            body: Box::new(body),
            response_body: Some(text),
            span_trace: SpanTrace::capture(),
        }
    }

    /// Checks connectivity and credentials.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<Status> {
        self.get(LockstepEndpoint::Status, &()).await
    }

    /// Access any record type's collection.
    #[must_use]
    pub fn resource<R: Resource>(&self) -> ResourceApi<'_, R> {
        ResourceApi {
            client: self,
            _resource: PhantomData,
        }
    }

    /// Access the companies API
    #[must_use]
    pub fn companies(&self) -> ResourceApi<'_, Company> {
        self.resource()
    }

    /// Access the contacts API
    #[must_use]
    pub fn contacts(&self) -> ResourceApi<'_, Contact> {
        self.resource()
    }

    /// Access the invoices API
    #[must_use]
    pub fn invoices(&self) -> ResourceApi<'_, Invoice> {
        self.resource()
    }

    /// Access the payments API
    #[must_use]
    pub fn payments(&self) -> ResourceApi<'_, Payment> {
        self.resource()
    }

    /// Access the webhooks API
    #[must_use]
    pub fn webhooks(&self) -> ResourceApi<'_, Webhook> {
        self.resource()
    }

    /// Access the sync API
    #[must_use]
    pub fn sync(&self) -> SyncApi<'_> {
        SyncApi { client: self }
    }

    /// Access the reports API
    #[must_use]
    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi { client: self }
    }
}

/// API handler for one record collection.
pub struct ResourceApi<'a, R> {
    client: &'a Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for ResourceApi<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("resource", &R::PATH)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceApi<'_, R> {
    /// Query records with filter, include, order and pagination.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn query(&self, parameters: &QueryParameters) -> Result<FetchResult<R>> {
        self.client
            .get(LockstepEndpoint::Query(R::PATH), parameters)
            .await
    }

    /// Retrieve a single record, embedding the named related collections.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn retrieve(&self, id: Uuid, include: &[&str]) -> Result<R> {
        self.client
            .get(LockstepEndpoint::Record(R::PATH, id), &IncludeParameter::new(include))
            .await
    }

    /// Create records; the server returns them with identifiers assigned.
    #[instrument(skip(self, records), fields(resource = R::PATH, count = records.len()))]
    pub async fn create(&self, records: &[R]) -> Result<Vec<R>> {
        self.client
            .post(LockstepEndpoint::Collection(R::PATH), records)
            .await
    }

    /// Update a record. `changes` holds only the members to overwrite, e.g.
    /// `serde_json::json!({ "memoText": "disputed" })`.
    #[instrument(skip(self, changes), fields(resource = R::PATH))]
    pub async fn update<P: Serialize + ?Sized>(&self, id: Uuid, changes: &P) -> Result<R> {
        self.client
            .patch(LockstepEndpoint::Record(R::PATH, id), changes)
            .await
    }

    /// Delete a record.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client
            .delete(LockstepEndpoint::Record(R::PATH, id))
            .await
    }
}

/// API handler for sync requests
#[derive(Debug)]
pub struct SyncApi<'a> {
    client: &'a Client,
}

impl SyncApi<'_> {
    /// Ask the platform to pull fresh data for an app enrollment.
    #[instrument(skip(self))]
    pub async fn submit(&self, submission: &SyncSubmit) -> Result<SyncRequest> {
        self.client
            .post(LockstepEndpoint::Collection(SyncRequest::PATH), submission)
            .await
    }

    /// Retrieve a sync request, optionally with `include=Details`.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: Uuid, include: &[&str]) -> Result<SyncRequest> {
        self.client.resource::<SyncRequest>().retrieve(id, include).await
    }

    #[instrument(skip(self))]
    pub async fn query(&self, parameters: &QueryParameters) -> Result<FetchResult<SyncRequest>> {
        self.client.resource::<SyncRequest>().query(parameters).await
    }
}

/// API handler for reports
#[derive(Debug)]
pub struct ReportsApi<'a> {
    client: &'a Client,
}

impl ReportsApi<'_> {
    /// Accounts-receivable aging, one entry per bucket and currency.
    #[instrument(skip(self))]
    pub async fn aging(&self, parameters: &AgingParameters) -> Result<Vec<Aging>> {
        self.client.get(LockstepEndpoint::AgingReport, parameters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::config::Environment;

    #[test]
    fn custom_environment_sets_base_url() {
        let url = Url::parse("http://localhost:1234").unwrap();
        let client = Client::new(
            Config::new(Credentials::api_key("key")).with_environment(Environment::Custom(url)),
        )
        .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:1234/");
    }

    #[test]
    fn invalid_application_name_is_rejected() {
        let result = Client::new(
            Config::new(Credentials::api_key("key")).with_application_name("line\nbreak"),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn resource_api_debug_names_collection() {
        let client = Client::new(Config::new(Credentials::api_key("key"))).unwrap();
        assert_eq!(
            format!("{:?}", client.invoices()),
            "ResourceApi { resource: \"Invoices\", .. }"
        );
    }
}
