//! Unit representation with conversion rules

use std::fmt;
use serde::{Serialize, Deserialize};

/// How a unit maps onto its domain's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// value_base = value * factor
    Linear { factor: f64 },
    /// value_base = value * factor + offset (temperature scales)
    Affine { factor: f64, offset: f64 },
    /// value_base = numerator / value (consumption vs. economy units)
    Reciprocal { numerator: f64 },
    /// value_base = value / rate, where `rate` is quoted per one base unit
    Quoted { rate: f64 },
}

impl Rule {
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Rule::Linear { factor } => value * factor,
            Rule::Affine { factor, offset } => value * factor + offset,
            Rule::Reciprocal { numerator } => numerator / value,
            Rule::Quoted { rate } => value / rate,
        }
    }

    pub fn from_base(&self, value_base: f64) -> f64 {
        match *self {
            Rule::Linear { factor } => value_base / factor,
            Rule::Affine { factor, offset } => (value_base - offset) / factor,
            Rule::Reciprocal { numerator } => numerator / value_base,
            Rule::Quoted { rate } => value_base * rate,
        }
    }

    /// True when both directions return their input unchanged
    pub fn is_identity(&self) -> bool {
        match *self {
            Rule::Linear { factor } => factor == 1.0,
            Rule::Affine { factor, offset } => factor == 1.0 && offset == 0.0,
            Rule::Reciprocal { .. } => false,
            Rule::Quoted { rate } => rate == 1.0,
        }
    }

    /// Reciprocal rules have no finite image at zero
    pub fn is_invertible_at_zero(&self) -> bool {
        !matches!(self, Rule::Reciprocal { .. })
    }

    fn is_well_formed(&self) -> bool {
        let nonzero_finite = |x: f64| x.is_finite() && x != 0.0;
        match *self {
            Rule::Linear { factor } => nonzero_finite(factor),
            Rule::Affine { factor, offset } => nonzero_finite(factor) && offset.is_finite(),
            Rule::Reciprocal { numerator } => nonzero_finite(numerator),
            Rule::Quoted { rate } => nonzero_finite(rate) && rate > 0.0,
        }
    }
}

/// A named unit within one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Display name, unique within its domain (e.g. "Kilometers")
    pub name: String,
    pub rule: Rule,
}

impl Unit {
    /// Proportional unit: `factor` base units per unit
    pub fn linear(name: &str, factor: f64) -> Self {
        Unit { name: name.to_string(), rule: Rule::Linear { factor } }
    }

    /// Unit with offset (for temperature conversions)
    pub fn affine(name: &str, factor: f64, offset: f64) -> Self {
        Unit { name: name.to_string(), rule: Rule::Affine { factor, offset } }
    }

    /// Inverse-proportional unit: `numerator / value` base units
    pub fn reciprocal(name: &str, numerator: f64) -> Self {
        Unit { name: name.to_string(), rule: Rule::Reciprocal { numerator } }
    }

    /// Unit quoted as `rate` units per base unit (exchange rates)
    pub fn quoted(name: &str, rate: f64) -> Self {
        Unit { name: name.to_string(), rule: Rule::Quoted { rate } }
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.rule.to_base(value)
    }

    pub fn from_base(&self, value_base: f64) -> f64 {
        self.rule.from_base(value_base)
    }

    pub fn is_identity(&self) -> bool {
        self.rule.is_identity()
    }

    /// Factors must be finite and non-zero, rates positive
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && self.rule.is_well_formed()
    }

    /// Convert a value from this unit to another unit of the same domain
    pub fn convert_to(&self, value: f64, target: &Unit) -> f64 {
        target.from_base(self.to_base(value))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::linear("Meters", 1.0)
    }

    fn kilometer() -> Unit {
        Unit::linear("Kilometers", 1000.0)
    }

    fn celsius() -> Unit {
        Unit::affine("Celsius", 1.0, 273.15)
    }

    fn liters_per_100km() -> Unit {
        Unit::reciprocal("Liters per 100 Kilometers", 100.0)
    }

    #[test]
    fn test_identity_unit() {
        assert!(meter().is_identity());
        assert!(!kilometer().is_identity());
        assert!(!celsius().is_identity());
        assert!(Unit::quoted("USD", 1.0).is_identity());
    }

    #[test]
    fn test_to_base_conversion() {
        assert_eq!(kilometer().to_base(5.0), 5000.0);
        assert_eq!(celsius().to_base(0.0), 273.15);
    }

    #[test]
    fn test_from_base_conversion() {
        assert_eq!(kilometer().from_base(5000.0), 5.0);
        assert!((celsius().from_base(373.15) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion() {
        let converted = meter().convert_to(5000.0, &kilometer());
        assert_eq!(converted, 5.0);
    }

    #[test]
    fn test_reciprocal_rule() {
        let u = liters_per_100km();
        // 5 L/100km is 20 km/L
        assert_eq!(u.to_base(5.0), 20.0);
        assert_eq!(u.from_base(20.0), 5.0);
        assert!(u.to_base(0.0).is_infinite());
        assert!(!u.rule.is_invertible_at_zero());
    }

    #[test]
    fn test_quoted_rule() {
        let eur = Unit::quoted("EUR", 0.9);
        assert_eq!(eur.from_base(10.0), 9.0);
        assert!((eur.to_base(9.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_well_formed() {
        assert!(kilometer().is_well_formed());
        assert!(!Unit::linear("Broken", 0.0).is_well_formed());
        assert!(!Unit::linear("Broken", f64::NAN).is_well_formed());
        assert!(!Unit::quoted("XXX", -1.0).is_well_formed());
        assert!(!Unit::linear("  ", 1.0).is_well_formed());
    }

    #[test]
    fn test_rule_serde_tag() {
        let json = serde_json::to_string(&Rule::Linear { factor: 2.0 }).unwrap();
        assert_eq!(json, r#"{"kind":"linear","factor":2.0}"#);
    }
}
