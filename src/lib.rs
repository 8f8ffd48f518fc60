//! # lockstep-rs
//!
//! A Rust client library for the Lockstep platform API.
//!
//! Every listing endpoint answers with a [`FetchResult`]: one page of records
//! plus the pagination state the server applied. Every failure answers with
//! problem details, surfaced as [`Error::Api`] carrying an [`ErrorResult`].
//!
//! ```ignore
//! use lockstep_rs::{Client, QueryParameters};
//!
//! let client = Client::from_env()?;
//! let params = QueryParameters::builder()
//!     .with_filter("outstandingBalanceAmount gt 0")
//!     .with_page(100, 0);
//! let invoices = client.invoices().query(&params).await?;
//! for invoice in &invoices {
//!     println!("{:?} {:?}", invoice.invoice_id, invoice.outstanding_balance_amount);
//! }
//! ```
//!
//! ## Sentry Integration
//!
//! Errors include async span traces that capture the call stack at the point
//! of error creation. Set up tracing with `ErrorLayer` to record them:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())  // Required for SpanTrace capture
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//! ```
//!
//! With the `sentry` feature enabled, errors also convert into breadcrumbs.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod query;
pub mod utils;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use auth::Credentials;
pub use client::{Client, ReportsApi, ResourceApi, SyncApi};
pub use config::{Config, Environment};
pub use endpoints::LockstepEndpoint;
pub use entities::*;
pub use error::{Error, ErrorResult};
pub use query::QueryParameters;

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;

// Re-export record types for convenience
pub use entities::aging::{Aging, AgingParameters};
pub use entities::company::Company;
pub use entities::contact::Contact;
pub use entities::invoice::{Invoice, InvoiceLine, InvoicePayment};
pub use entities::payment::{Payment, PaymentApplied};
pub use entities::status::Status;
pub use entities::sync::{SyncRequest, SyncStatus, SyncSubmit};
pub use entities::webhook::{Webhook, WebhookStatus};
