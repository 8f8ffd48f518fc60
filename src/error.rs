use std::collections::BTreeMap;
use std::fmt;

use miette::Diagnostic;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing_error::SpanTrace;

/// The problem-details body Lockstep returns with every non-success response.
///
/// All five members are optional: the server is expected to send them
/// together, but older API versions omit some (usually `instance`), and a
/// missing member must not make the whole error unreadable. `status` is the
/// field to branch on; the rest is diagnostic payload whose vocabulary is
/// owned by the server.
///
/// Members are read one by one: a member of an unexpected type (e.g.
/// `"status": "404"` where a number belongs) is converted when possible and
/// otherwise left in `extensions`, never failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    /// URI or identifier classifying the error category.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Short human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP-status-like numeric code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Longer human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Identifier of this occurrence, for correlating with server logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Any extension members the server added to the problem details.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for ErrorResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut members = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            r#type: take_string(&mut members, "type"),
            title: take_string(&mut members, "title"),
            status: take_status(&mut members),
            detail: take_string(&mut members, "detail"),
            instance: take_string(&mut members, "instance"),
            extensions: members,
        })
    }
}

fn take_string(members: &mut BTreeMap<String, Value>, name: &str) -> Option<String> {
    match members.remove(name)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            members.insert(name.to_string(), other);
            None
        }
    }
}

fn take_status(members: &mut BTreeMap<String, Value>) -> Option<u16> {
    let value = members.remove("status")?;
    let status = match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if status.is_none() && !value.is_null() {
        members.insert("status".to_string(), value);
    }
    status
}

impl ErrorResult {
    /// True when `status` is in the 4xx range.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status.is_some_and(|s| (400..500).contains(&s))
    }

    /// True when `status` is in the 5xx range.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status.is_some_and(|s| (500..600).contains(&s))
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.title) {
            (Some(status), Some(title)) => write!(f, "{status} {title}")?,
            (Some(status), None) => write!(f, "{status}")?,
            (None, Some(title)) => write!(f, "{title}")?,
            (None, None) => write!(f, "unknown error")?,
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(kind) = &self.r#type {
            write!(f, " (type: {kind})")?;
        }
        if let Some(instance) = &self.instance {
            write!(f, " (instance: {instance})")?;
        }
        Ok(())
    }
}

/// Errors that can occur when interacting with the Lockstep API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The request could not be sent or no response arrived.
    #[error("error making request: {0}")]
    #[diagnostic(
        code(lockstep_rs::request_error),
        help("Check your network connection and Lockstep API availability")
    )]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status_code}) from {url}: {body}")]
    #[diagnostic(
        code(lockstep_rs::api_error),
        help("Inspect the status and detail returned by the Lockstep API")
    )]
    Api {
        status_code: StatusCode,
        url: String,
        body: Box<ErrorResult>,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    /// A success status came back with a body that does not match the
    /// expected shape.
    #[error("malformed {entity_type} response: {source}")]
    #[diagnostic(
        code(lockstep_rs::malformed_response),
        help("The API returned data in an unexpected format; the client and server disagree on the response contract")
    )]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        entity_type: String,
        url: Option<String>,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(lockstep_rs::invalid_endpoint),
        help("Check that the base URL and endpoint path are correctly formatted")
    )]
    InvalidEndpoint,

    #[error("invalid configuration: {0}")]
    #[diagnostic(
        code(lockstep_rs::configuration),
        help("Set LOCKSTEP_API_KEY or LOCKSTEP_BEARER_TOKEN, or build the Config explicitly")
    )]
    Configuration(String),
}

impl Error {
    /// Builds a malformed-response error for a body that failed to decode as `T`.
    pub(crate) fn malformed<T>(
        source: serde_json::Error,
        url: Option<String>,
        response_body: Option<String>,
    ) -> Self {
        Self::MalformedResponse {
            source,
            entity_type: entity_name::<T>(),
            url,
            response_body,
            span_trace: SpanTrace::capture(),
        }
    }

    /// HTTP status of an application error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    /// The parsed problem-details body of an application error.
    #[must_use]
    pub fn error_result(&self) -> Option<&ErrorResult> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// URL of the request that failed, when it got as far as a response.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Api { url, .. } => Some(url),
            Self::MalformedResponse { url, .. } => url.as_deref(),
            Self::Request(e) => e.url().map(url::Url::as_str),
            _ => None,
        }
    }

    /// The raw response body, when one was received.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Api { response_body, .. } | Self::MalformedResponse { response_body, .. } => {
                response_body.as_deref()
            }
            _ => None,
        }
    }

    /// Span trace captured where the error was created.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Api { span_trace, .. } | Self::MalformedResponse { span_trace, .. } => {
                Some(span_trace)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

/// Short type name used in error messages (`Invoice`, `FetchResult<Payment>`).
pub(crate) fn entity_name<T>() -> String {
    let full = std::any::type_name::<T>();
    match full.split_once('<') {
        Some((outer, inner)) => {
            let outer = outer.rsplit("::").next().unwrap_or(outer);
            let inner = inner.trim_end_matches('>');
            let inner = inner.rsplit("::").next().unwrap_or(inner);
            format!("{outer}<{inner}>")
        }
        None => full.rsplit("::").next().unwrap_or(full).to_string(),
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
