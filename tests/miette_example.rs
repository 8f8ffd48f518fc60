//! Example test showing how errors surface through miette
use miette::{Diagnostic, IntoDiagnostic, Result};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lockstep_rs::error::Error;

mod test_utils;
use test_utils::{do_setup, mock_client};

#[tokio::test]
async fn miette_integration_example() -> Result<()> {
    do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Status"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
            "status": 401,
            "detail": "API key is not valid"
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);

    // Our Error is already a Diagnostic, with a code and help text
    let err = client.ping().await.unwrap_err();
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("lockstep_rs::api_error")
    );
    assert!(err.help().is_some());
    println!("{:?}", miette::Report::new(err));

    // Foreign errors still need into_diagnostic()
    let id = uuid::Uuid::parse_str("5c8b3c56-3f3a-4a7d-9e2e-7d0f8b1c2a11").into_diagnostic()?;
    assert!(!id.is_nil());

    let missing: lockstep_rs::error::Result<()> = Err(Error::InvalidEndpoint);
    assert_eq!(
        missing.unwrap_err().code().map(|c| c.to_string()).as_deref(),
        Some("lockstep_rs::invalid_endpoint")
    );

    Ok(())
}
