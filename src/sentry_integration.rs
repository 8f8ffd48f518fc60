//! Sentry integration for lockstep-rs errors.
//!
//! Only available when the `sentry` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! lockstep-rs = { version = "0.1", features = ["sentry"] }
//! ```
//!
//! Errors created inside an instrumented span carry a span trace, which
//! [`error_to_sentry_context`] forwards as extra context.

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, protocol::Value};

use crate::error::Error;

const MAX_BODY_PREVIEW: usize = 500;

/// Convert a lockstep-rs Error into a Sentry breadcrumb, so the API call
/// history leading up to an event is visible.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let mut data = BTreeMap::new();
        let (category, message) = match error {
            Error::Request(source) => ("http.request", format!("HTTP request error: {source}")),

            Error::Api {
                status_code,
                url,
                body,
                ..
            } => {
                data.insert("url".to_string(), Value::from(url.clone()));
                data.insert("status_code".to_string(), Value::from(status_code.as_u16()));
                if let Some(kind) = &body.r#type {
                    data.insert("type".to_string(), Value::from(kind.clone()));
                }
                if let Some(instance) = &body.instance {
                    data.insert("instance".to_string(), Value::from(instance.clone()));
                }
                ("lockstep.api", format!("Lockstep API error: {body}"))
            }

            Error::MalformedResponse {
                entity_type, url, ..
            } => {
                data.insert("entity_type".to_string(), Value::from(entity_type.clone()));
                if let Some(url) = url {
                    data.insert("url".to_string(), Value::from(url.clone()));
                }
                (
                    "http.response",
                    format!("Failed to deserialize {entity_type} response"),
                )
            }

            Error::InvalidEndpoint => ("lockstep.config", "Invalid endpoint URL".to_string()),

            Error::Configuration(reason) => {
                ("lockstep.config", format!("Invalid configuration: {reason}"))
            }
        };

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(message),
            data,
            level: sentry_core::Level::Error,
            ..Default::default()
        }
    }
}

/// Extracts error details for use as additional Sentry context.
///
/// ```ignore
/// use sentry::configure_scope;
/// use lockstep_rs::sentry_integration::error_to_sentry_context;
///
/// if let Err(e) = client.invoices().retrieve(id, &[]).await {
///     configure_scope(|scope| {
///         for (key, value) in error_to_sentry_context(&e) {
///             scope.set_extra(&key, value);
///         }
///     });
/// }
/// ```
pub fn error_to_sentry_context(error: &Error) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();

    if let Some(span_trace) = error.span_trace() {
        context.insert(
            "lockstep.span_trace".to_string(),
            Value::from(format!("{span_trace}")),
        );
    }

    if let Some(url) = error.url() {
        context.insert("lockstep.url".to_string(), Value::from(url.to_string()));
    }

    if let Some(status) = error.status() {
        context.insert("lockstep.status_code".to_string(), Value::from(status.as_u16()));
    }

    if let Some(body) = error.response_body() {
        let truncated = match body.char_indices().nth(MAX_BODY_PREVIEW) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        context.insert("lockstep.response_body".to_string(), Value::from(truncated));
    }

    if let Some(result) = error.error_result() {
        if let Some(title) = &result.title {
            context.insert("lockstep.title".to_string(), Value::from(title.clone()));
        }
        if let Some(detail) = &result.detail {
            context.insert("lockstep.detail".to_string(), Value::from(detail.clone()));
        }
        if let Some(instance) = &result.instance {
            context.insert("lockstep.instance".to_string(), Value::from(instance.clone()));
        }
    }

    context
}
