//! Exchange-rate tables
//!
//! A `RateTable` is the currency domain's stand-in for a static unit table:
//! every currency is a unit quoted per one US dollar. Tables are immutable
//! once built and are replaced wholesale on refresh.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use unitdeck_core::{parse_magnitude, format_fixed, ConversionError};
use unitdeck_units::{Domain, Unit};

/// Currency every rate is quoted against
pub const BASE_CURRENCY: &str = "USD";

/// Fractional digits for currency results
pub const CURRENCY_PRECISION: usize = 4;

/// Identifier of the currency table
pub const CURRENCY_DOMAIN: &str = "currency";

/// Rates for one instant, quoted per `base`
#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    pub as_of: DateTime<Utc>,
    pub base: String,
    rates: BTreeMap<String, f64>,
    #[serde(skip)]
    domain: Domain,
}

impl RateTable {
    /// Build a table from (code, rate) pairs.
    ///
    /// Codes are upper-cased. Non-finite or non-positive rates are dropped.
    /// The base currency is always present with rate 1.
    pub fn new<I>(as_of: DateTime<Utc>, rates: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            let code = normalize_code(&code);
            if code.is_empty() {
                continue;
            }
            if !rate.is_finite() || rate <= 0.0 {
                warn!(code = %code, rate, "dropping unusable exchange rate");
                continue;
            }
            table.insert(code, rate);
        }
        table.insert(BASE_CURRENCY.to_string(), 1.0);

        let domain = build_domain(&table);
        RateTable {
            as_of,
            base: BASE_CURRENCY.to_string(),
            rates: table,
            domain,
        }
    }

    /// Rate for a code, matched case-insensitively
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&normalize_code(code)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(|c| c.as_str())
    }

    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// The table as a unit domain (every code a `Quoted` unit)
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Convert an amount between two codes. `None` if either code is
    /// missing or the result is not finite.
    pub fn convert_value(&self, value: f64, from: &str, to: &str) -> Option<f64> {
        let (from, to) = (normalize_code(from), normalize_code(to));
        if !self.rates.contains_key(&from) || !self.rates.contains_key(&to) {
            return None;
        }
        unitdeck_units::convert_value(value, &from, &to, &self.domain).ok().flatten()
    }

    /// Convert a raw keypad string; `None` for unparseable input or
    /// unknown codes.
    pub fn convert(&self, raw_input: &str, from: &str, to: &str) -> Option<String> {
        let value = parse_magnitude(raw_input).ok()?;
        let converted = self.convert_value(value, from, to)?;
        format_fixed(converted, CURRENCY_PRECISION)
    }

    /// Look up a code with the engine's strict contract
    pub fn unit_checked(&self, code: &str) -> Result<&Unit, ConversionError> {
        self.domain.unit(&normalize_code(code))
    }
}

/// Table keys are trimmed upper-case ISO codes
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn build_domain(rates: &BTreeMap<String, f64>) -> Domain {
    let units = rates.iter()
        .map(|(code, &rate)| Unit::quoted(code, rate))
        .collect();
    let to = if rates.contains_key("EUR") { "EUR" } else { BASE_CURRENCY };
    Domain::new(CURRENCY_DOMAIN, "Currency", BASE_CURRENCY, units)
        .with_defaults(BASE_CURRENCY, to)
        .with_precision(CURRENCY_PRECISION)
}

/// Convert using whatever table is available. With no table yet, there is
/// nothing to show.
pub fn convert_currency(raw_input: &str, from: &str, to: &str, table: Option<&RateTable>) -> Option<String> {
    table?.convert(raw_input, from, to)
}
