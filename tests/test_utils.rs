use std::sync::Once;

use tracing::info;
use url::Url;
use wiremock::MockServer;

use lockstep_rs::{Client, Config, Credentials, Environment};

pub const TEST_API_KEY: &str = "test-api-key";

static LOGGING_CONFIGURED: Once = Once::new();

/// Setup before test runs
pub fn do_setup() {
    LOGGING_CONFIGURED.call_once(|| tracing_subscriber::fmt().with_test_writer().init());
    info!("Setting up test environment");
}

/// Configuration pointing at a mock server, authenticated with an API key.
#[allow(dead_code)]
pub fn mock_config(server: &MockServer) -> Config {
    let url = Url::parse(&server.uri()).expect("mock server uri is a URL");
    Config::new(Credentials::api_key(TEST_API_KEY)).with_environment(Environment::Custom(url))
}

/// Creates a client talking to the given mock server
#[allow(dead_code)]
pub fn mock_client(server: &MockServer) -> Client {
    Client::new(mock_config(server)).expect("client builds for mock server")
}
