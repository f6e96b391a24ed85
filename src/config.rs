use crate::errors::{AppError, ResultExt};
use crate::table::TableFormat;
use crate::transactions::DEFAULT_COLUMNS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_NVP_URL: &str = "https://api-3t.paypal.com/nvp";

/// API identity fields (`USER`, `PWD`, `SIGNATURE`, ...), passed through as-is.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }

    /// Loads credentials from a JSON object of string values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file {}", path.display()))?;

        let credentials: Credentials = serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!(
                "Invalid credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            "Loaded {} credential field(s) from {}",
            credentials.0.len(),
            path.display()
        );
        Ok(credentials)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Redact values so credentials never leak through `{:?}`
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|k| (k, "[REDACTED]")))
            .finish()
    }
}

/// Runtime settings for the reporter.
#[derive(Debug, Clone)]
pub struct Settings {
    pub nvp_url: String,
    /// Request timeout; `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub table_format: TableFormat,
    pub columns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nvp_url: DEFAULT_NVP_URL.to_string(),
            timeout: None,
            table_format: TableFormat::default(),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source; unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let settings = Self {
            nvp_url: match var("PAYPAL_NVP_URL") {
                Some(url) => {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("PAYPAL_NVP_URL must start with http:// or https://");
                    }
                    url
                }
                None => defaults.nvp_url,
            },
            timeout: match var("PAYPAL_TIMEOUT_SECS") {
                Some(secs) => {
                    let secs: u64 = secs.trim().parse().map_err(|_| {
                        anyhow::anyhow!("PAYPAL_TIMEOUT_SECS must be a positive integer")
                    })?;
                    if secs == 0 {
                        anyhow::bail!("PAYPAL_TIMEOUT_SECS must be a positive integer");
                    }
                    Some(Duration::from_secs(secs))
                }
                None => defaults.timeout,
            },
            table_format: match var("REPORTER_TABLE_FORMAT") {
                Some(name) => name.parse()?,
                None => defaults.table_format,
            },
            columns: match var("REPORTER_COLUMNS") {
                Some(list) => list
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.columns,
            },
        };

        tracing::debug!("NVP endpoint: {}", settings.nvp_url);
        tracing::debug!(
            "Table format: {:?}, columns: {}",
            settings.table_format,
            settings.columns.join(" ")
        );

        Ok(settings)
    }
}
