use std::fmt;

use reqwest::header::{self, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Header carrying a Lockstep API key.
pub const API_KEY_HEADER: &str = "Api-Key";

/// How requests authenticate against the API.
///
/// Only static credentials are supported: obtaining or refreshing bearer
/// tokens is left to the caller.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A long-lived API key, sent as `Api-Key: <key>`.
    ApiKey(String),
    /// A JWT obtained elsewhere, sent as `Authorization: Bearer <token>`.
    BearerToken(String),
}

impl Credentials {
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    #[must_use]
    pub fn bearer_token(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// Reads `LOCKSTEP_API_KEY`, falling back to `LOCKSTEP_BEARER_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("LOCKSTEP_API_KEY") {
            return Ok(Self::ApiKey(key));
        }
        if let Some(token) = non_empty("LOCKSTEP_BEARER_TOKEN") {
            return Ok(Self::BearerToken(token));
        }
        Err(Error::Configuration(
            "neither LOCKSTEP_API_KEY nor LOCKSTEP_BEARER_TOKEN is set".to_string(),
        ))
    }

    /// The header this credential is sent in, marked sensitive so it never
    /// shows up in debug output.
    pub(crate) fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        let (name, value) = match self {
            Self::ApiKey(key) => (HeaderName::from_static("api-key"), key.clone()),
            Self::BearerToken(token) => (header::AUTHORIZATION, format!("Bearer {token}")),
        };
        let mut value = HeaderValue::from_str(&value).map_err(|_| {
            Error::Configuration("credentials contain characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}
