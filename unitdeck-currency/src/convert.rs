//! Currency as a `Converter`
//!
//! Reads whatever table the feed currently holds. Until the first fetch
//! succeeds, and for codes the table does not quote, there is no result.

use unitdeck_core::{ConversionError, Converter};
use crate::{RateFeed, RateTable, BASE_CURRENCY, CURRENCY_DOMAIN, CURRENCY_PRECISION};

/// Default target currency of a fresh screen
pub const DEFAULT_TARGET: &str = "EUR";

#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    feed: RateFeed,
}

impl CurrencyConverter {
    pub fn new(feed: RateFeed) -> Self {
        Self { feed }
    }

    /// Converter over a single, never-refreshed table
    pub fn fixed(table: RateTable) -> Self {
        Self::new(RateFeed::fixed(table))
    }

    pub fn feed(&self) -> &RateFeed {
        &self.feed
    }

    pub fn has_rates(&self) -> bool {
        self.feed.current().is_some()
    }
}

impl Converter for CurrencyConverter {
    fn id(&self) -> &str {
        CURRENCY_DOMAIN
    }

    fn precision(&self) -> usize {
        CURRENCY_PRECISION
    }

    fn default_pair(&self) -> (String, String) {
        (BASE_CURRENCY.to_string(), DEFAULT_TARGET.to_string())
    }

    fn convert(&self, raw_input: &str, from: &str, to: &str) -> Result<Option<String>, ConversionError> {
        let table = self.feed.current();
        Ok(crate::convert_currency(raw_input, from, to, table.as_deref()))
    }
}
