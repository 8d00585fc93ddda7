//! Exchange-rate providers
//!
//! `RateProvider` is the seam between the refresh task and the network.
//! `HttpRateProvider` talks to a currencyapi.com-compatible `latest`
//! endpoint; tests substitute scripted providers.

use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{RateError, RateTable, BASE_CURRENCY};

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://api.currencyapi.com/v3";
pub const DEFAULT_REFRESH_SECS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "UNITDECK_RATES_API_KEY";
pub const ENV_BASE_URL: &str = "UNITDECK_RATES_BASE_URL";
pub const ENV_REFRESH_SECS: &str = "UNITDECK_RATES_REFRESH_SECS";
pub const ENV_TIMEOUT_SECS: &str = "UNITDECK_RATES_TIMEOUT_SECS";

/// Rate provider settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct RateConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub refresh_interval: Duration,
    pub timeout: Duration,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable or zero durations fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let base_url = lookup(ENV_BASE_URL)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.base_url);

        Self {
            api_key,
            base_url,
            refresh_interval: seconds(&lookup, ENV_REFRESH_SECS, defaults.refresh_interval),
            timeout: seconds(&lookup, ENV_TIMEOUT_SECS, defaults.timeout),
        }
    }

    /// Builder: set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder: set the endpoint root
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

fn seconds<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            warn!(key, value = %raw, default_secs = default.as_secs(), "ignoring invalid duration");
            default
        }
    }
}

// ============================================================================
// Provider trait
// ============================================================================

/// Source of exchange-rate tables
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the latest rates quoted per one unit of `base`
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, RateError>;
}

// ============================================================================
// HTTP provider
// ============================================================================

/// `GET {base_url}/latest?apikey=..&base_currency=..`
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpRateProvider {
    pub fn new(config: &RateConfig) -> Result<Self, RateError> {
        let api_key = config.api_key.clone()
            .ok_or_else(|| RateError::Config(format!("{ENV_API_KEY} is not set")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RateError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, RateError> {
        debug!(url = %self.latest_url(), base, "fetching exchange rates");

        let response = self.client
            .get(self.latest_url())
            .query(&[("apikey", self.api_key.as_str()), ("base_currency", base)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RateError::Status { status: status.as_u16(), body });
        }

        let payload: LatestResponse = response.json().await?;
        table_from_response(payload, Utc::now())
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Body of the `latest` endpoint
#[derive(Debug, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub meta: Option<LatestMeta>,
    pub data: HashMap<String, QuotedRate>,
}

#[derive(Debug, Deserialize)]
pub struct LatestMeta {
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct QuotedRate {
    pub value: f64,
}

/// Decode a `latest` body. The provider's own timestamp wins over
/// `fetched_at` when present.
pub fn parse_latest(body: &str, fetched_at: DateTime<Utc>) -> Result<RateTable, RateError> {
    let payload: LatestResponse = serde_json::from_str(body)?;
    table_from_response(payload, fetched_at)
}

pub fn table_from_response(payload: LatestResponse, fetched_at: DateTime<Utc>) -> Result<RateTable, RateError> {
    if payload.data.is_empty() {
        return Err(RateError::Empty);
    }

    let as_of = payload.meta
        .and_then(|m| m.last_updated_at)
        .unwrap_or(fetched_at);

    let table = RateTable::new(as_of, payload.data.into_iter().map(|(code, q)| (code, q.value)));
    if table.codes().all(|c| c == BASE_CURRENCY) {
        return Err(RateError::Empty);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "meta": { "last_updated_at": "2024-03-01T23:59:59Z" },
        "data": {
            "EUR": { "code": "EUR", "value": 0.92 },
            "GBP": { "code": "GBP", "value": 0.79 },
            "USD": { "code": "USD", "value": 1 }
        }
    }"#;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_parse_latest() {
        let fetched = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let table = parse_latest(SAMPLE, fetched).unwrap();
        assert_eq!(table.rate("EUR"), Some(0.92));
        assert_eq!(table.rate("GBP"), Some(0.79));
        assert_eq!(table.rate("USD"), Some(1.0));
        assert_eq!(table.as_of, Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_without_meta_uses_fetch_time() {
        let fetched = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let table = parse_latest(r#"{"data":{"JPY":{"value":150.5}}}"#, fetched).unwrap();
        assert_eq!(table.as_of, fetched);
        assert_eq!(table.rate("JPY"), Some(150.5));
    }

    #[test]
    fn test_parse_errors() {
        let now = Utc::now();
        assert!(matches!(parse_latest("not json", now), Err(RateError::Decode(_))));
        assert!(matches!(parse_latest(r#"{"meta":{}}"#, now), Err(RateError::Decode(_))));
        assert_eq!(parse_latest(r#"{"data":{}}"#, now).unwrap_err(), RateError::Empty);
        assert_eq!(parse_latest(r#"{"data":{"EUR":{"value":0}}}"#, now).unwrap_err(), RateError::Empty);
    }

    #[test]
    fn test_config_defaults() {
        let config = RateConfig::from_lookup(|_| None);
        assert_eq!(config, RateConfig::default());
        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = RateConfig::from_lookup(lookup(&[
            (ENV_API_KEY, " secret "),
            (ENV_BASE_URL, "http://localhost:8080/v3/"),
            (ENV_REFRESH_SECS, "60"),
            (ENV_TIMEOUT_SECS, "0"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:8080/v3");
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_blank_key_is_absent() {
        let config = RateConfig::from_lookup(lookup(&[(ENV_API_KEY, "   ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_http_provider_needs_key() {
        let err = HttpRateProvider::new(&RateConfig::default()).err().unwrap();
        assert!(matches!(err, RateError::Config(_)));

        let provider = HttpRateProvider::new(&RateConfig::default().with_api_key("k")).unwrap();
        assert_eq!(provider.latest_url(), "https://api.currencyapi.com/v3/latest");
    }
}
