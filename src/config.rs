use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{
    auth::Credentials,
    error::{Error, Result},
};

pub const PRODUCTION_URL: &str = "https://api.lockstep.io/";
pub const SANDBOX_URL: &str = "https://api.sbx.lockstep.io/";

/// Which Lockstep deployment the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    /// Any other deployment, e.g. a local mock server.
    Custom(Url),
}

impl Environment {
    /// Root URL every endpoint path is joined onto.
    pub fn base_url(&self) -> Result<Url> {
        match self {
            Self::Production => Url::parse(PRODUCTION_URL).map_err(|_| Error::InvalidEndpoint),
            Self::Sandbox => Url::parse(SANDBOX_URL).map_err(|_| Error::InvalidEndpoint),
            Self::Custom(url) => {
                // Url::join drops the last segment unless the base ends with '/'.
                let mut url = url.clone();
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok(url)
            }
        }
    }

    /// Parses `production` / `prd` or `sandbox` / `sbx`, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prd" => Ok(Self::Production),
            "sandbox" | "sbx" => Ok(Self::Sandbox),
            other => Err(Error::Configuration(format!("unknown environment `{other}`"))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Sandbox => f.write_str("sandbox"),
            Self::Custom(url) => write!(f, "{url}"),
        }
    }
}

/// Everything needed to build a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub credentials: Credentials,
    /// Sent as the `ApplicationName` header so requests can be attributed.
    pub application_name: Option<String>,
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Config {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            environment: Environment::default(),
            credentials,
            application_name: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a configuration from the process environment.
    ///
    /// | Variable                      | Meaning                                   |
    /// |-------------------------------|-------------------------------------------|
    /// | `LOCKSTEP_API_KEY`            | API key (takes precedence)                |
    /// | `LOCKSTEP_BEARER_TOKEN`       | bearer token                              |
    /// | `LOCKSTEP_ENVIRONMENT`        | `production` (default) or `sandbox`       |
    /// | `LOCKSTEP_BASE_URL`           | custom base URL, overrides the above      |
    /// | `LOCKSTEP_APPLICATION_NAME`   | value of the `ApplicationName` header     |
    /// | `LOCKSTEP_TIMEOUT_SECS`       | request timeout in seconds                |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = Credentials::from_lookup(&lookup)?;
        let mut config = Self::new(credentials);

        if let Some(name) = lookup("LOCKSTEP_ENVIRONMENT") {
            config.environment = Environment::from_name(&name)?;
        }
        if let Some(base_url) = lookup("LOCKSTEP_BASE_URL") {
            let url = Url::parse(&base_url).map_err(|e| {
                Error::Configuration(format!("LOCKSTEP_BASE_URL `{base_url}` is not a URL: {e}"))
            })?;
            config.environment = Environment::Custom(url);
        }
        if let Some(name) = lookup("LOCKSTEP_APPLICATION_NAME") {
            config.application_name = Some(name);
        }
        if let Some(secs) = lookup("LOCKSTEP_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::Configuration(format!("LOCKSTEP_TIMEOUT_SECS `{secs}` is invalid: {e}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        debug!(environment = %config.environment, "loaded configuration from environment");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_production() {
        let config = Config::from_lookup(lookup(&[("LOCKSTEP_API_KEY", "key")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.application_name, None);
        assert_eq!(config.timeout, None);
        assert_eq!(
            config.environment.base_url().unwrap().as_str(),
            "https://api.lockstep.io/"
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("LOCKSTEP_BEARER_TOKEN", "token"),
            ("LOCKSTEP_ENVIRONMENT", "SBX"),
            ("LOCKSTEP_APPLICATION_NAME", "collections-bot"),
            ("LOCKSTEP_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.credentials, Credentials::bearer_token("token"));
        assert_eq!(config.application_name.as_deref(), Some("collections-bot"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn base_url_overrides_environment_and_gains_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("LOCKSTEP_API_KEY", "key"),
            ("LOCKSTEP_ENVIRONMENT", "sandbox"),
            ("LOCKSTEP_BASE_URL", "http://localhost:8080/mock"),
        ]))
        .unwrap();
        assert_eq!(
            config.environment.base_url().unwrap().as_str(),
            "http://localhost:8080/mock/"
        );
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        for vars in [
            vec![("LOCKSTEP_API_KEY", "key"), ("LOCKSTEP_ENVIRONMENT", "staging")],
            vec![("LOCKSTEP_API_KEY", "key"), ("LOCKSTEP_BASE_URL", "not a url")],
            vec![("LOCKSTEP_API_KEY", "key"), ("LOCKSTEP_TIMEOUT_SECS", "soon")],
            vec![],
        ] {
            assert!(matches!(
                Config::from_lookup(lookup(&vars)),
                Err(Error::Configuration(_))
            ));
        }
    }
}
