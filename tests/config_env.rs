//! `Config::from_env` against the real process environment.

use std::time::Duration;

use lockstep_rs::{Client, Config, Credentials, Environment, Error};

mod test_utils;
use test_utils::do_setup;

const VARS: [&str; 6] = [
    "LOCKSTEP_API_KEY",
    "LOCKSTEP_BEARER_TOKEN",
    "LOCKSTEP_ENVIRONMENT",
    "LOCKSTEP_BASE_URL",
    "LOCKSTEP_APPLICATION_NAME",
    "LOCKSTEP_TIMEOUT_SECS",
];

/// Replaces every `LOCKSTEP_*` variable with the given values.
fn set_env(vars: &[(&str, &str)]) {
    // SAFETY: every test touching the environment is #[serial]
    unsafe {
        for name in VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
    }
}

#[test]
#[serial_test::serial]
fn sandbox_client_from_env() {
    do_setup();
    set_env(&[
        ("LOCKSTEP_API_KEY", "key-from-env"),
        ("LOCKSTEP_ENVIRONMENT", "sandbox"),
        ("LOCKSTEP_TIMEOUT_SECS", "15"),
    ]);

    let config = Config::from_env().unwrap();
    assert_eq!(config.environment, Environment::Sandbox);
    assert_eq!(config.credentials, Credentials::api_key("key-from-env"));
    assert_eq!(config.timeout, Some(Duration::from_secs(15)));

    let client = Client::from_env().unwrap();
    assert_eq!(client.base_url().as_str(), "https://api.sbx.lockstep.io/");
    set_env(&[]);
}

#[test]
#[serial_test::serial]
fn missing_credentials_fail_with_configuration_error() {
    do_setup();
    set_env(&[("LOCKSTEP_ENVIRONMENT", "production")]);

    let err = Client::from_env().unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("LOCKSTEP_API_KEY"));
}

#[test]
#[serial_test::serial]
fn bearer_token_with_base_url_override() {
    do_setup();
    set_env(&[
        ("LOCKSTEP_BEARER_TOKEN", "jwt"),
        ("LOCKSTEP_BASE_URL", "http://localhost:5000/lockstep"),
    ]);

    let credentials = Credentials::from_env().unwrap();
    assert_eq!(credentials, Credentials::bearer_token("jwt"));

    let client = Client::from_env().unwrap();
    assert_eq!(client.base_url().as_str(), "http://localhost:5000/lockstep/");
    set_env(&[]);
}
