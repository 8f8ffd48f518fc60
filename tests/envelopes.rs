use anyhow::Result;
use serde_json::{Value, json};

use lockstep_rs::{Error, ErrorResult, FetchResult, Invoice, Page};

mod test_utils;
use test_utils::do_setup;

#[test]
fn empty_envelope_round_trips() -> Result<()> {
    do_setup();
    for payload in [
        json!({ "totalCount": 0, "pageSize": null, "pageNumber": null, "records": [] }),
        json!({ "totalCount": 0, "pageSize": 25, "pageNumber": 0, "records": [] }),
        json!({ "totalCount": null, "pageSize": null, "pageNumber": null, "records": [] }),
    ] {
        let result: FetchResult<Invoice> = serde_json::from_value(payload.clone())?;
        assert!(result.is_empty());
        assert_eq!(serde_json::to_value(&result)?, payload);
    }
    Ok(())
}

#[test]
fn empty_records_stay_an_array() {
    do_setup();
    let result = FetchResult::<Invoice>::from_json(r#"{"records":[]}"#).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["records"], json!([]));
    assert_eq!(value["totalCount"], Value::Null);
}

#[test]
fn page_fields_are_paired() {
    do_setup();
    let paired = [
        r#"{"records":[]}"#,
        r#"{"pageSize":10,"pageNumber":3,"records":[]}"#,
        r#"{"pageSize":null,"pageNumber":null,"records":[]}"#,
    ];
    for body in paired {
        let result = FetchResult::<Invoice>::from_json(body).unwrap();
        assert_eq!(result.page_size().is_none(), result.page_number().is_none());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["pageSize"].is_null(), value["pageNumber"].is_null());
    }

    let unpaired = [
        r#"{"pageSize":10,"records":[]}"#,
        r#"{"pageNumber":0,"records":[]}"#,
        r#"{"pageSize":10,"pageNumber":null,"records":[]}"#,
    ];
    for body in unpaired {
        let err = FetchResult::<Invoice>::from_json(body).unwrap_err();
        assert!(err.is_malformed_response(), "{body} should be malformed");
    }
}

#[test]
fn missing_records_is_malformed() {
    do_setup();
    let err = FetchResult::<Invoice>::from_json(r#"{"totalCount":5}"#).unwrap_err();
    match &err {
        Error::MalformedResponse {
            entity_type,
            source,
            response_body,
            ..
        } => {
            assert_eq!(entity_type, "FetchResult<Invoice>");
            assert!(source.to_string().contains("records"));
            assert_eq!(response_body.as_deref(), Some(r#"{"totalCount":5}"#));
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }

    // null is not an empty list either
    assert!(
        FetchResult::<Invoice>::from_json(r#"{"totalCount":5,"records":null}"#)
            .unwrap_err()
            .is_malformed_response()
    );
}

#[test]
fn paging_helpers_follow_zero_based_pages() {
    do_setup();
    let body = json!({ "totalCount": 5, "pageSize": 2, "pageNumber": 2, "records": [{}] });
    let last: FetchResult<Invoice> = serde_json::from_value(body).unwrap();
    assert_eq!(last.page, Some(Page { size: 2, number: 2 }));
    assert_eq!(last.has_more(), Some(false));

    let ids = last.map(|invoice| invoice.invoice_id);
    assert_eq!(ids.records, vec![None]);
    assert_eq!(ids.total_count, Some(5));
}

#[test]
fn error_envelope_keeps_all_five_members() -> Result<()> {
    do_setup();
    let body = r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"Invoice xyz not found","instance":"req-123"}"#;
    let result: ErrorResult = serde_json::from_str(body)?;

    assert_eq!(result.r#type.as_deref(), Some("about:blank"));
    assert_eq!(result.title.as_deref(), Some("Not Found"));
    assert_eq!(result.status, Some(404));
    assert_eq!(result.detail.as_deref(), Some("Invoice xyz not found"));
    assert_eq!(result.instance.as_deref(), Some("req-123"));
    assert!(result.extensions.is_empty());

    let written: Value = serde_json::to_value(&result)?;
    assert_eq!(written, serde_json::from_str::<Value>(body)?);
    Ok(())
}

#[test]
fn error_envelope_tolerates_missing_members() {
    do_setup();
    let result: ErrorResult =
        serde_json::from_str(r#"{"title":"Internal Server Error","status":500}"#).unwrap();
    assert_eq!(result.instance, None);
    assert_eq!(result.r#type, None);
    assert!(result.is_server_error());
    assert_eq!(result.to_string(), "500 Internal Server Error");

    let empty: ErrorResult = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, ErrorResult::default());
}

#[test]
fn error_envelope_keeps_validation_extensions() {
    do_setup();
    let result: ErrorResult = serde_json::from_value(json!({
        "title": "One or more validation errors occurred.",
        "status": 400,
        "errors": { "invoiceDate": ["The invoiceDate field is required."] }
    }))
    .unwrap();

    assert_eq!(
        result.extensions["errors"]["invoiceDate"][0],
        json!("The invoiceDate field is required.")
    );
    let written = serde_json::to_value(&result).unwrap();
    assert!(written.get("errors").is_some());
    assert!(written.get("detail").is_none());
}
