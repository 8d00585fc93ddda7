//! Conversion domains
//!
//! A domain is one conversion category: an ordered unit table, the base unit
//! every rule is expressed against, the pair a new screen opens with, and the
//! number of fractional digits results are shown with.

use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use unitdeck_core::ConversionError;
use crate::Unit;

/// Fractional digits for physical-quantity domains
pub const DEFAULT_PRECISION: usize = 6;

/// One conversion category with its unit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Registry key (e.g. "fuel-mileage")
    pub id: String,
    /// Display title (e.g. "Fuel Mileage")
    pub title: String,
    pub base_unit: String,
    pub default_from: String,
    pub default_to: String,
    pub precision: usize,
    units: Vec<Unit>,
}

impl Domain {
    /// Create a domain whose default pair is the first two units
    pub fn new(id: &str, title: &str, base_unit: &str, units: Vec<Unit>) -> Self {
        let default_from = units.first().map(|u| u.name.clone()).unwrap_or_default();
        let default_to = units.get(1).map(|u| u.name.clone()).unwrap_or_else(|| default_from.clone());
        Domain {
            id: id.to_string(),
            title: title.to_string(),
            base_unit: base_unit.to_string(),
            default_from,
            default_to,
            precision: DEFAULT_PRECISION,
            units,
        }
    }

    /// Builder: set the pair a fresh screen opens with
    pub fn with_defaults(mut self, from: &str, to: &str) -> Self {
        self.default_from = from.to_string();
        self.default_to = to.to_string();
        self
    }

    /// Builder: set output precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Units in display order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a unit, failing with `UnknownUnit`
    pub fn unit(&self, name: &str) -> Result<&Unit, ConversionError> {
        self.get(name)
            .ok_or_else(|| ConversionError::unknown_unit(&self.id, name))
    }

    pub fn base(&self) -> Result<&Unit, ConversionError> {
        self.unit(&self.base_unit)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Check table invariants: unique well-formed units, an identity base,
    /// and defaults that name real units.
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.units.is_empty() {
            return Err(ConversionError::invalid_domain(&self.id, "no units defined"));
        }

        let mut seen = HashSet::new();
        for unit in &self.units {
            if !unit.is_well_formed() {
                return Err(ConversionError::invalid_domain(
                    &self.id,
                    format!("unit '{}' has a degenerate rule", unit.name),
                ));
            }
            if !seen.insert(unit.name.as_str()) {
                return Err(ConversionError::invalid_domain(
                    &self.id,
                    format!("duplicate unit '{}'", unit.name),
                ));
            }
        }

        let base = self.get(&self.base_unit).ok_or_else(|| {
            ConversionError::invalid_domain(&self.id, format!("base unit '{}' not in table", self.base_unit))
        })?;
        if !base.is_identity() {
            return Err(ConversionError::invalid_domain(
                &self.id,
                format!("base unit '{}' is not the identity", self.base_unit),
            ));
        }

        for name in [&self.default_from, &self.default_to] {
            if !self.contains(name) {
                return Err(ConversionError::invalid_domain(
                    &self.id,
                    format!("default unit '{}' not in table", name),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> Domain {
        Domain::new("length", "Length", "Meters", vec![
            Unit::linear("Meters", 1.0),
            Unit::linear("Kilometers", 1000.0),
            Unit::linear("Feet", 0.3048),
        ])
    }

    #[test]
    fn test_default_pair() {
        let d = length();
        assert_eq!(d.default_from, "Meters");
        assert_eq!(d.default_to, "Kilometers");

        let d = d.with_defaults("Feet", "Meters");
        assert_eq!(d.default_from, "Feet");
        assert_eq!(d.default_to, "Meters");
    }

    #[test]
    fn test_lookup() {
        let d = length();
        assert!(d.contains("Feet"));
        assert_eq!(d.unit("Kilometers").unwrap().to_base(2.0), 2000.0);
        assert_eq!(
            d.unit("Furlongs"),
            Err(ConversionError::unknown_unit("length", "Furlongs"))
        );
        assert_eq!(d.unit_names(), vec!["Meters", "Kilometers", "Feet"]);
    }

    #[test]
    fn test_validate_ok() {
        assert!(length().validate().is_ok());
    }

    #[test]
    fn test_validate_base_must_be_identity() {
        let d = Domain::new("length", "Length", "Kilometers", vec![
            Unit::linear("Meters", 1.0),
            Unit::linear("Kilometers", 1000.0),
        ]);
        assert!(matches!(d.validate(), Err(ConversionError::InvalidDomain { .. })));
    }

    #[test]
    fn test_validate_defaults_present() {
        let d = length().with_defaults("Meters", "Leagues");
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_duplicates() {
        let d = Domain::new("length", "Length", "Meters", vec![
            Unit::linear("Meters", 1.0),
            Unit::linear("Meters", 1.0),
        ]);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_empty() {
        let d = Domain::new("empty", "Empty", "None", vec![]);
        assert!(d.is_empty());
        assert!(d.validate().is_err());
    }
}
