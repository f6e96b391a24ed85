use anyhow::Context;
use paypal_reporter::{print_transactions, Credentials, DateRange, PayPalClient, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints last month's PayPal transactions.
///
/// Usage: `paypal-reporter <credentials.json>`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paypal_reporter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: paypal-reporter <credentials.json>")?;

    let credentials = Credentials::from_file(&path)?;
    let settings = Settings::from_env()?;

    let range = DateRange::previous_month_from_now();
    let client = PayPalClient::new(&settings)?;
    let txns = client.get_transactions(&credentials, &range).await?;

    print_transactions(&txns, settings.table_format, &settings.columns);
    Ok(())
}
