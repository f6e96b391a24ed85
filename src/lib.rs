//! PayPal Transaction Reporter Library
//!
//! Retrieves transaction records from the PayPal NVP API for a date range,
//! regroups the indexed flat response into per-transaction records and
//! renders them as a text table.
//!
//! # Modules
//!
//! - `config`: Credentials file and environment settings.
//! - `date_range`: Search window computation.
//! - `errors`: Error handling types.
//! - `gateway_client`: PayPal NVP client and response decoding.
//! - `table`: Table rendering.
//! - `transactions`: Assembly of indexed fields into records.

pub mod config;
pub mod date_range;
pub mod errors;
pub mod gateway_client;
pub mod table;
pub mod transactions;

pub use config::{Credentials, Settings};
pub use date_range::DateRange;
pub use errors::{AppError, RemoteApiError};
pub use gateway_client::PayPalClient;
pub use table::{print_transactions, render_transactions, TableFormat};
pub use transactions::{collect_transactions, Transaction, DEFAULT_COLUMNS};

/// Gets the list of transactions in `range`, highest index first.
pub async fn get_transactions(
    settings: &Settings,
    credentials: &Credentials,
    range: &DateRange,
) -> Result<Vec<Transaction>, AppError> {
    PayPalClient::new(settings)?
        .get_transactions(credentials, range)
        .await
}
