//! Assembly of indexed NVP fields into transaction records.
//!
//! `TransactionSearch` returns one flat list of fields where each field of
//! the n-th result carries an `L_` prefix and the index as a suffix
//! (`L_AMT0`, `L_AMT1`, ...). These are regrouped per index here.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Decoded response body, one value per field.
pub type FlatResponse = HashMap<String, String>;

/// One payment event: field name to raw string value.
pub type Transaction = BTreeMap<String, String>;

/// Fields shown when the caller doesn't pick columns.
pub const DEFAULT_COLUMNS: [&str; 9] = [
    "TIMESTAMP",
    "TRANSACTIONID",
    "STATUS",
    "TYPE",
    "NAME",
    "AMT",
    "FEEAMT",
    "NETAMT",
    "CURRENCYCODE",
];

// ASCII classes on purpose: PayPal indices are plain decimal digits.
static INDEXED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^L_([^0-9]+)([0-9]+)").expect("indexed key pattern is valid"));

/// Splits an indexed key into field name and index.
///
/// `L_AMT7` gives `("AMT", 7)`. Keys without the `L_` prefix or without a
/// numeric suffix give `None`.
pub fn parse_key(key: &str) -> Option<(String, u64)> {
    let caps = INDEXED_KEY.captures(key)?;
    let index = caps[2].parse::<u64>().ok()?;
    Some((caps[1].to_string(), index))
}

/// `2013-01-15T10:30:00Z` becomes `2013-01-15 10:30:00`.
pub fn normalize_timestamp(value: &str) -> String {
    let mut chars = value.chars();
    chars.next_back();
    chars.as_str().replace('T', " ")
}

/// Groups indexed fields into records, highest index first.
///
/// Keys that are not indexed (`ACK`, `VERSION`, ...) are skipped. Every
/// indexed field is kept so callers can display any column subset.
pub fn collect_transactions(raw: &FlatResponse) -> Vec<Transaction> {
    let mut by_index: BTreeMap<u64, Transaction> = BTreeMap::new();

    for (key, value) in raw {
        let Some((name, index)) = parse_key(key) else {
            continue;
        };
        let value = if name == "TIMESTAMP" {
            normalize_timestamp(value)
        } else {
            value.clone()
        };
        by_index.entry(index).or_default().insert(name, value);
    }

    tracing::debug!("Assembled {} transaction(s)", by_index.len());

    by_index.into_values().rev().collect()
}
