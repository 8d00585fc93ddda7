//! Conversion sessions
//!
//! A session is one open converter screen. It owns the keypad buffer and the
//! selected unit pair, and re-converts after every transition so `result()`
//! always reflects the current state. Nothing outlives the session.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tracing::debug;
use unitdeck_core::{ConversionError, Converter, Edit, InputBuffer, Key};
use unitdeck_currency::{
    CurrencyConverter, HttpRateProvider, RateConfig, RateError, RateFeed, RateProvider,
    RateRefresher, RateTable,
};
use unitdeck_units::{Domain, DOMAINS};

/// One open conversion screen over any `Converter`
#[derive(Debug, Clone)]
pub struct Session<C: Converter> {
    converter: C,
    input: InputBuffer,
    from: String,
    to: String,
    result: Option<String>,
}

/// Session over a static unit table
pub type UnitSession = Session<&'static Domain>;

impl<C: Converter> Session<C> {
    /// Open on the converter's default pair with an empty buffer
    pub fn new(converter: C) -> Self {
        let (from, to) = converter.default_pair();
        Session {
            converter,
            input: InputBuffer::new(),
            from,
            to,
            result: None,
        }
    }

    /// Open on an explicit pair; fails if either unit is unknown
    pub fn with_pair(converter: C, from: &str, to: &str) -> Result<Self, ConversionError> {
        let mut session = Self::new(converter);
        session.converter.convert("", from, to)?;
        session.from = from.to_string();
        session.to = to.to_string();
        Ok(session)
    }

    /// Apply one key press and re-convert
    pub fn press(&mut self, key: Key) -> Result<Option<&str>, ConversionError> {
        if self.input.apply(key) == Edit::Swap {
            std::mem::swap(&mut self.from, &mut self.to);
        }
        self.reconvert()
    }

    /// Apply a key by its on-screen label. Unknown labels are ignored.
    pub fn press_label(&mut self, label: &str) -> Result<Option<&str>, ConversionError> {
        match Key::from_label(label) {
            Some(key) => self.press(key),
            None => Ok(self.result()),
        }
    }

    /// Type a whole string key by key
    pub fn type_str(&mut self, text: &str) -> Result<Option<&str>, ConversionError> {
        for c in text.chars() {
            if let Some(key) = Key::from_label(c.encode_utf8(&mut [0; 4])) {
                self.input.apply(key);
                if key == Key::Swap {
                    std::mem::swap(&mut self.from, &mut self.to);
                }
            }
        }
        self.reconvert()
    }

    /// Pick the source unit. On an unknown unit the session is unchanged.
    pub fn select_from(&mut self, unit: &str) -> Result<Option<&str>, ConversionError> {
        let result = self.converter.convert(self.input.as_str(), unit, &self.to)?;
        self.from = unit.to_string();
        self.result = result;
        Ok(self.result())
    }

    /// Pick the target unit. On an unknown unit the session is unchanged.
    pub fn select_to(&mut self, unit: &str) -> Result<Option<&str>, ConversionError> {
        let result = self.converter.convert(self.input.as_str(), &self.from, unit)?;
        self.to = unit.to_string();
        self.result = result;
        Ok(self.result())
    }

    pub fn swap(&mut self) -> Result<Option<&str>, ConversionError> {
        self.press(Key::Swap)
    }

    pub fn clear(&mut self) -> Result<Option<&str>, ConversionError> {
        self.press(Key::Clear)
    }

    /// Re-run the conversion against the current state
    pub fn reconvert(&mut self) -> Result<Option<&str>, ConversionError> {
        self.result = self.converter.convert(self.input.as_str(), &self.from, &self.to)?;
        Ok(self.result())
    }

    /// Latest formatted result; `None` while there is nothing to show
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Raw buffer text
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Buffer as displayed ("0" when empty)
    pub fn input_display(&self) -> String {
        self.input.to_string()
    }

    pub fn from_unit(&self) -> &str {
        &self.from
    }

    pub fn to_unit(&self) -> &str {
        &self.to
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

/// Open a session on a static domain by id, title or alias
pub fn open_units(domain: &str) -> Result<UnitSession, ConversionError> {
    DOMAINS.domain(domain).map(Session::new)
}

// ============================================================================
// Currency
// ============================================================================

/// Currency screen: a session plus the refresh task feeding it.
///
/// Dropping the session cancels the refresh task.
pub struct CurrencySession {
    session: Session<CurrencyConverter>,
    feed: RateFeed,
    refresher: Option<RateRefresher>,
}

impl CurrencySession {
    /// Start refreshing from `provider`. Must be called inside a tokio runtime.
    pub fn start(provider: Arc<dyn RateProvider>, interval: Duration) -> Self {
        let refresher = RateRefresher::spawn(provider, interval);
        let feed = refresher.feed();
        Self {
            session: Session::new(CurrencyConverter::new(feed.clone())),
            feed,
            refresher: Some(refresher),
        }
    }

    /// Start refreshing from the configured HTTP endpoint
    pub fn from_config(config: &RateConfig) -> Result<Self, RateError> {
        let provider = HttpRateProvider::new(config)?;
        Ok(Self::start(Arc::new(provider), config.refresh_interval))
    }

    /// A session over one fixed table, with no refresh task
    pub fn with_table(table: RateTable) -> Self {
        let feed = RateFeed::fixed(table);
        Self {
            session: Session::new(CurrencyConverter::new(feed.clone())),
            feed,
            refresher: None,
        }
    }

    /// Wait for the next published table and re-convert against it.
    /// Returns `false` once no more tables can arrive.
    pub async fn rates_changed(&mut self) -> bool {
        if !self.feed.changed().await {
            return false;
        }
        debug!("exchange rates changed; re-converting");
        // codes never fail for currency; a missing code is simply no result
        let _ = self.session.reconvert();
        true
    }

    /// Timestamp of the table currently in use
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.feed.current().map(|t| t.as_of)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.as_ref().is_some_and(|r| r.is_running())
    }

    pub fn session(&self) -> &Session<CurrencyConverter> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<CurrencyConverter> {
        &mut self.session
    }

    /// Stop refreshing and wait for the task to exit
    pub async fn close(mut self) {
        if let Some(refresher) = self.refresher.take() {
            refresher.shutdown().await;
        }
    }
}
