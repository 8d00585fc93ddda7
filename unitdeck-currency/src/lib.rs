//! UnitDeck Currency - Live exchange rates
//!
//! Currency is the one category whose table changes at runtime:
//! - `RateTable`: an immutable snapshot of rates quoted per US dollar
//! - `RateProvider` / `HttpRateProvider`: where snapshots come from
//! - `RateRefresher` / `RateFeed`: periodic refresh and the published table
//! - `CurrencyConverter`: the `Converter` sessions drive
//! - `CURRENCIES`: picker metadata and search

mod error;
mod rates;
mod provider;
mod refresh;
mod currencies;
mod convert;

pub use error::RateError;
pub use rates::{RateTable, convert_currency, normalize_code, BASE_CURRENCY, CURRENCY_PRECISION, CURRENCY_DOMAIN};
pub use provider::{
    RateProvider, HttpRateProvider, RateConfig, LatestResponse, parse_latest,
    DEFAULT_BASE_URL, DEFAULT_REFRESH_SECS, DEFAULT_TIMEOUT_SECS,
    ENV_API_KEY, ENV_BASE_URL, ENV_REFRESH_SECS, ENV_TIMEOUT_SECS,
};
pub use refresh::{RateFeed, RateRefresher};
pub use currencies::{CurrencyInfo, CURRENCIES, find, search, flag_emoji};
pub use convert::{CurrencyConverter, DEFAULT_TARGET};
