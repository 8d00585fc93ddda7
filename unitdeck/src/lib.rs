//! UnitDeck - Keypad unit and currency converter

mod catalog;
mod session;

pub use catalog::{Category, CategoryKind, IconSet, CATALOG, categories, category};
pub use session::{Session, UnitSession, CurrencySession, open_units};

pub use unitdeck_core::{Converter, ConversionError, InputBuffer, Key, KEYPAD_LAYOUT};
pub use unitdeck_units::{Domain, Unit, DOMAINS};
pub use unitdeck_currency::{
    CurrencyConverter, CurrencyInfo, RateConfig, RateFeed, RateProvider, RateRefresher, RateTable,
};

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use unitdeck_currency::{normalize_code, HttpRateProvider, BASE_CURRENCY, DEFAULT_TARGET};

/// One finished conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub domain: String,
    pub value: String,
    pub from: String,
    pub to: String,
    /// `None` when there is nothing to show
    pub result: Option<String>,
}

/// One finished currency conversion with the age of the rates used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyConversion {
    pub value: String,
    pub from: String,
    pub to: String,
    pub result: Option<String>,
    pub as_of: Option<DateTime<Utc>>,
}

/// Main UnitDeck engine: static tables plus whatever rate table is current
pub struct UnitDeck {
    rates: RateFeed,
    refresher: Option<RateRefresher>,
}

impl UnitDeck {
    /// Engine with no exchange rates
    pub fn new() -> Self {
        Self { rates: RateFeed::empty(), refresher: None }
    }

    /// Engine over one fixed rate table
    pub fn with_rates(table: RateTable) -> Self {
        Self { rates: RateFeed::fixed(table), refresher: None }
    }

    /// Engine refreshing rates from `provider`. Must be called inside a
    /// tokio runtime.
    pub fn with_provider(provider: Arc<dyn RateProvider>, interval: Duration) -> Self {
        let refresher = RateRefresher::spawn(provider, interval);
        Self { rates: refresher.feed(), refresher: Some(refresher) }
    }

    /// Engine for a configuration. Without a usable API key currency stays
    /// unavailable and everything else works.
    pub fn from_config(config: &RateConfig) -> Self {
        if config.api_key.is_none() {
            info!("no exchange-rate API key configured; currency conversion disabled");
            return Self::new();
        }
        match HttpRateProvider::new(config) {
            Ok(provider) => Self::with_provider(Arc::new(provider), config.refresh_interval),
            Err(e) => {
                warn!(error = %e, "exchange-rate provider unavailable");
                Self::new()
            }
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        CATALOG
    }

    pub fn domain(&self, key: &str) -> Result<&'static Domain, ConversionError> {
        DOMAINS.domain(key)
    }

    /// Open a keypad session on a static domain
    pub fn open(&self, key: &str) -> Result<UnitSession, ConversionError> {
        open_units(key)
    }

    /// Convert within a static domain. Missing units fall back to the
    /// domain's default pair.
    pub fn convert(
        &self,
        key: &str,
        value: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Conversion, ConversionError> {
        let domain = self.domain(key)?;
        let from = from.unwrap_or(&domain.default_from);
        let to = to.unwrap_or(&domain.default_to);
        let result = domain.convert(value, from, to)?;
        Ok(Conversion {
            domain: domain.id.clone(),
            value: value.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            result,
        })
    }

    /// Convert between currencies with the current table. Codes are
    /// upper-cased; missing ones default to USD and EUR.
    pub fn convert_currency(&self, value: &str, from: Option<&str>, to: Option<&str>) -> CurrencyConversion {
        let from = from.map(normalize_code).unwrap_or_else(|| BASE_CURRENCY.to_string());
        let to = to.map(normalize_code).unwrap_or_else(|| DEFAULT_TARGET.to_string());
        let table = self.rates.current();
        CurrencyConversion {
            result: unitdeck_currency::convert_currency(value, &from, &to, table.as_deref()),
            as_of: table.map(|t| t.as_of),
            value: value.to_string(),
            from,
            to,
        }
    }

    pub fn search_currencies(&self, query: &str) -> Vec<&'static CurrencyInfo> {
        unitdeck_currency::search(query)
    }

    /// A converter reading this engine's rate feed
    pub fn currency_converter(&self) -> CurrencyConverter {
        CurrencyConverter::new(self.rates.clone())
    }

    pub fn rates(&self) -> Option<Arc<RateTable>> {
        self.rates.current()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.as_ref().is_some_and(|r| r.is_running())
    }
}

impl Default for UnitDeck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::new(Utc::now(), [("EUR".to_string(), 0.9), ("GBP".to_string(), 0.75)])
    }

    #[test]
    fn test_convert_defaults() {
        let deck = UnitDeck::new();
        let c = deck.convert("distance", "1500", None, None).unwrap();
        assert_eq!(c.from, "Meters");
        assert_eq!(c.to, "Kilometers");
        assert_eq!(c.result.as_deref(), Some("1.500000"));
    }

    #[test]
    fn test_convert_explicit_pair() {
        let deck = UnitDeck::new();
        let c = deck.convert("Pressure", "1", Some("Atmospheres"), Some("Pascals")).unwrap();
        assert_eq!(c.domain, "pressure");
        assert_eq!(c.result.as_deref(), Some("101325.000000"));
    }

    #[test]
    fn test_convert_errors() {
        let deck = UnitDeck::new();
        assert!(matches!(deck.convert("shoe-size", "9", None, None), Err(ConversionError::UnknownDomain(_))));
        assert!(matches!(
            deck.convert("distance", "9", Some("Cubits"), None),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_currency_without_rates() {
        let deck = UnitDeck::new();
        let c = deck.convert_currency("10", None, None);
        assert_eq!(c.from, "USD");
        assert_eq!(c.to, "EUR");
        assert_eq!(c.result, None);
        assert_eq!(c.as_of, None);
    }

    #[test]
    fn test_currency_with_rates() {
        let deck = UnitDeck::with_rates(rates());
        let c = deck.convert_currency("10", Some("usd"), Some("gbp"));
        assert_eq!(c.result.as_deref(), Some("7.5000"));
        assert!(c.as_of.is_some());
        assert_eq!(deck.currency_converter().convert("10", "USD", "EUR").unwrap().as_deref(), Some("9.0000"));
    }

    #[test]
    fn test_from_config_without_key() {
        let deck = UnitDeck::from_config(&RateConfig::default());
        assert!(!deck.is_refreshing());
        assert!(deck.rates().is_none());
    }

    #[test]
    fn test_search_currencies() {
        let deck = UnitDeck::default();
        let codes: Vec<_> = deck.search_currencies("pound").iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["GBP", "EGP"]);
    }
}
