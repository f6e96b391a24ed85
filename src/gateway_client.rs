use crate::config::{Credentials, Settings};
use crate::date_range::DateRange;
use crate::errors::{AppError, RemoteApiError, ResultExt};
use crate::transactions::{collect_transactions, FlatResponse, Transaction};
use std::collections::HashMap;
use tracing;

pub const PAYPAL_VERSION: &str = "124";
pub const TRANSACTION_SEARCH: &str = "TransactionSearch";

/// Client for the PayPal NVP (name-value pair) API.
#[derive(Clone)]
pub struct PayPalClient {
    client: reqwest::Client,
    nvp_url: String,
}

impl PayPalClient {
    /// Creates a new `PayPalClient`.
    ///
    /// # Arguments
    ///
    /// * `settings` - Endpoint and timeout to use for every request.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("paypal-reporter/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            nvp_url: settings.nvp_url.clone(),
        })
    }

    /// Sends a `TransactionSearch` request and returns the decoded fields.
    ///
    /// # Arguments
    ///
    /// * `credentials` - API identity fields merged into the query.
    /// * `range` - Inclusive search window.
    ///
    /// # Returns
    ///
    /// * `Result<FlatResponse, AppError>` - The raw fields, or a transport
    ///   error, or the error PayPal reported in the body.
    pub async fn send_request(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<FlatResponse, AppError> {
        let start = range.start_param();
        let end = range.end_param();

        // Fixed fields win over same-named credential keys
        let mut params: HashMap<&str, &str> = credentials.iter().collect();
        params.insert("VERSION", PAYPAL_VERSION);
        params.insert("METHOD", TRANSACTION_SEARCH);
        params.insert("STARTDATE", start.as_str());
        params.insert("ENDDATE", end.as_str());

        tracing::info!(
            "Searching PayPal transactions from {} to {} at {}",
            start,
            end,
            self.nvp_url
        );

        let response = self
            .client
            .get(&self.nvp_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let raw = collapse_multi_valued(parse_query_string(&body));
        tracing::debug!("PayPal returned {} field(s)", raw.len());

        raise_for_error(&raw)?;
        Ok(raw)
    }

    /// Fetches and assembles the transactions in `range`.
    pub async fn get_transactions(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<Vec<Transaction>, AppError> {
        let raw = self
            .send_request(credentials, range)
            .await
            .context("TransactionSearch request failed")?;
        let txns = collect_transactions(&raw);
        tracing::info!("✓ Retrieved {} transaction(s)", txns.len());
        Ok(txns)
    }
}

/// Decodes a URL-encoded body, keeping every value of repeated fields.
///
/// Blank values are dropped, so `A=&B=1` yields only `B`.
pub fn parse_query_string(body: &str) -> HashMap<String, Vec<String>> {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        if value.is_empty() {
            continue;
        }
        fields
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    fields
}

/// Keeps the first value of each field.
pub fn collapse_multi_valued(raw: HashMap<String, Vec<String>>) -> FlatResponse {
    raw.into_iter()
        .filter_map(|(key, values)| values.into_iter().next().map(|v| (key, v)))
        .collect()
}

/// Fails with the remote error when the response carries `L_ERRORCODE0`.
pub fn raise_for_error(raw: &FlatResponse) -> Result<(), AppError> {
    let Some(code) = raw.get("L_ERRORCODE0") else {
        return Ok(());
    };
    let field = |name: &str| raw.get(name).cloned().unwrap_or_default();

    let err = RemoteApiError {
        code: code.clone(),
        short_message: field("L_SHORTMESSAGE0"),
        long_message: field("L_LONGMESSAGE0"),
    };
    tracing::warn!("PayPal reported an error: {}", err);
    Err(AppError::RemoteApi(err))
}
