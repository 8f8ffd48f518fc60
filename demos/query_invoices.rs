//! Lists open invoices page by page.
//!
//! ```sh
//! LOCKSTEP_API_KEY=... LOCKSTEP_ENVIRONMENT=sandbox cargo run --example query_invoices
//! ```

use miette::Result;
use rust_decimal::Decimal;
use tracing::info;

use lockstep_rs::{Client, QueryParameters};

const PAGE_SIZE: u32 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::from_env()?;
    let status = client.ping().await?;
    info!(user = ?status.user_name, environment = ?status.environment, "connected");

    let mut params = QueryParameters::builder()
        .with_filter("outstandingBalanceAmount gt 0")
        .with_order("paymentDueDate asc")
        .with_page(PAGE_SIZE, 0);

    let mut outstanding = Decimal::ZERO;
    loop {
        let page = client.invoices().query(&params).await?;
        info!(total = ?page.total_count, page = ?page.page_number(), "fetched page");

        let more = page.has_more().unwrap_or(false);
        for invoice in page {
            outstanding += invoice.outstanding_balance_amount.unwrap_or_default();
            println!(
                "{:<20} {:>12} due {}",
                invoice.reference_code.unwrap_or_default(),
                invoice.outstanding_balance_amount.unwrap_or_default(),
                invoice
                    .payment_due_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
            );
        }

        match params.next_page() {
            Some(next) if more => params = next,
            _ => break,
        }
    }

    println!("total outstanding: {outstanding}");
    Ok(())
}
