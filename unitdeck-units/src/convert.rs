//! Conversion engine
//!
//! Two steps through the base unit: `to.from_base(from.to_base(value))`.
//! Unknown unit names are contract violations and fail fast. Input that does
//! not parse, and results that are not finite, resolve to `None`.

use unitdeck_core::{parse_magnitude, format_fixed, ConversionError, Converter};
use crate::Domain;

/// Convert a numeric value between two units of `domain`.
/// `Ok(None)` when the result is not finite (e.g. a reciprocal unit at 0).
pub fn convert_value(value: f64, from: &str, to: &str, domain: &Domain) -> Result<Option<f64>, ConversionError> {
    let from_unit = domain.unit(from)?;
    let to_unit = domain.unit(to)?;

    let converted = from_unit.convert_to(value, to_unit);
    Ok(converted.is_finite().then_some(converted))
}

/// Convert a raw keypad string and format it with the domain's precision.
///
/// Units are checked before the input, so a typo in a unit name surfaces
/// even while the buffer is still empty.
pub fn convert(raw_input: &str, from: &str, to: &str, domain: &Domain) -> Result<Option<String>, ConversionError> {
    domain.unit(from)?;
    domain.unit(to)?;

    let value = match parse_magnitude(raw_input) {
        Ok(v) => v,
        Err(_) => return Ok(None),
    };

    let converted = convert_value(value, from, to, domain)?;
    Ok(converted.and_then(|v| format_fixed(v, domain.precision)))
}

impl Converter for Domain {
    fn id(&self) -> &str {
        &self.id
    }

    fn precision(&self) -> usize {
        self.precision
    }

    fn default_pair(&self) -> (String, String) {
        (self.default_from.clone(), self.default_to.clone())
    }

    fn convert(&self, raw_input: &str, from: &str, to: &str) -> Result<Option<String>, ConversionError> {
        convert(raw_input, from, to, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DOMAINS;
    use proptest::prelude::*;
    use unitdeck_core::approx_eq;

    fn domain(id: &str) -> &'static Domain {
        DOMAINS.get(id).unwrap()
    }

    fn run(id: &str, raw: &str, from: &str, to: &str) -> Option<String> {
        convert(raw, from, to, domain(id)).unwrap()
    }

    #[test]
    fn test_distance_km_to_m() {
        assert_eq!(run("distance", "1", "Kilometers", "Meters").as_deref(), Some("1000.000000"));
    }

    #[test]
    fn test_pressure_atm_to_pa() {
        assert_eq!(run("pressure", "1", "Atmospheres", "Pascals").as_deref(), Some("101325.000000"));
    }

    #[test]
    fn test_temperature_affine() {
        assert_eq!(run("temperature", "100", "Celsius", "Fahrenheit").as_deref(), Some("212.000000"));
        assert_eq!(run("temperature", "32", "Fahrenheit", "Celsius").as_deref(), Some("0.000000"));
        assert_eq!(run("temperature", "0", "Celsius", "Kelvin").as_deref(), Some("273.150000"));
        assert_eq!(run("temperature", "-40", "Celsius", "Fahrenheit").as_deref(), Some("-40.000000"));
    }

    #[test]
    fn test_fuel_reciprocal_zero_has_no_result() {
        assert_eq!(run("fuel-mileage", "0", "Kilometers per Liter", "Liters per Kilometer"), None);
    }

    #[test]
    fn test_fuel_reciprocal_values() {
        assert_eq!(run("fuel-mileage", "20", "Kilometers per Liter", "Liters per 100 Kilometers").as_deref(), Some("5.000000"));
        assert_eq!(run("fuel-mileage", "5", "Liters per 100 Kilometers", "Kilometers per Liter").as_deref(), Some("20.000000"));
        assert_eq!(run("fuel-mileage", "10", "Miles per US Gallon", "Kilometers per Liter").as_deref(), Some("4.251440"));
    }

    #[test]
    fn test_angle_values() {
        assert_eq!(run("angle", "1", "Turns", "Degrees").as_deref(), Some("360.000000"));
        assert_eq!(run("angle", "180", "Degrees", "Radians").as_deref(), Some("3.141593"));
        assert_eq!(run("angle", "1", "Degrees", "Arcminutes").as_deref(), Some("60.000000"));
    }

    #[test]
    fn test_other_domains() {
        assert_eq!(run("energy", "1", "Kilowatt-hours", "Joules").as_deref(), Some("3600000.000000"));
        assert_eq!(run("time", "2", "Hours", "Minutes").as_deref(), Some("120.000000"));
        assert_eq!(run("volume", "1", "Gallons", "Liters").as_deref(), Some("3.785412"));
        assert_eq!(run("area", "1", "Hectares", "Ares").as_deref(), Some("100.000000"));
        assert_eq!(run("power", "1", "Horsepower", "Watts").as_deref(), Some("745.699872"));
        assert_eq!(run("torque", "1", "Kilonewton-meter", "Newton-meter").as_deref(), Some("1000.000000"));
        assert_eq!(run("weight", "1", "Pounds", "Kilograms").as_deref(), Some("0.453592"));
        assert_eq!(run("data-storage", "1", "Gibibytes", "Mebibytes").as_deref(), Some("1024.000000"));
        assert_eq!(run("data-speed", "8", "Megabits per Second", "Megabytes per Second").as_deref(), Some("1.000000"));
        assert_eq!(run("speed", "36", "Kilometers per Hour", "Meters per Second").as_deref(), Some("10.000000"));
        assert_eq!(run("force", "1", "Kilonewtons", "Newtons").as_deref(), Some("1000.000000"));
    }

    #[test]
    fn test_partial_keypad_input() {
        assert_eq!(run("distance", "2.", "Kilometers", "Meters").as_deref(), Some("2000.000000"));
        assert_eq!(run("distance", ".5", "Kilometers", "Meters").as_deref(), Some("500.000000"));
    }

    #[test]
    fn test_non_numeric_input_every_domain() {
        for d in DOMAINS.all() {
            let (from, to) = d.default_pair();
            for raw in ["", ".", "-", "abc"] {
                assert_eq!(convert(raw, &from, &to, d).unwrap(), None, "{} {:?}", d.id, raw);
            }
        }
    }

    #[test]
    fn test_unknown_unit_fails_fast() {
        let d = domain("distance");
        assert_eq!(
            convert("1", "Kilometres", "Meters", d),
            Err(ConversionError::unknown_unit("distance", "Kilometres"))
        );
        assert_eq!(
            convert("", "Meters", "Lightyears", d),
            Err(ConversionError::unknown_unit("distance", "Lightyears"))
        );
    }

    #[test]
    fn test_swap_is_involutive() {
        let d = domain("pressure");
        let (from, to) = ("Bars", "Torr");
        let forward = convert("3.5", from, to, d).unwrap();
        let (from, to) = (to, from);
        let (from, to) = (to, from);
        assert_eq!(convert("3.5", from, to, d).unwrap(), forward);
    }

    #[test]
    fn test_identity_every_unit() {
        for d in DOMAINS.all() {
            for u in d.units() {
                let out = convert_value(12.5, &u.name, &u.name, d).unwrap().unwrap();
                assert!(approx_eq(out, 12.5, 1e-12), "{} / {}: {}", d.id, u.name, out);
            }
        }
    }

    #[test]
    fn test_converter_trait() {
        let d = domain("distance");
        let c: &dyn Converter = d;
        assert_eq!(c.id(), "distance");
        assert_eq!(c.precision(), 6);
        assert_eq!(c.default_pair(), ("Meters".to_string(), "Kilometers".to_string()));
        assert_eq!(c.convert("1500", "Meters", "Kilometers").unwrap().as_deref(), Some("1.500000"));
    }

    /// Relative 1e-9, with an absolute floor for affine scales near their zero
    fn close(a: f64, b: f64) -> bool {
        approx_eq(a, b, 1e-9) || (a - b).abs() <= 1e-9
    }

    fn domain_and_pair() -> impl Strategy<Value = (&'static Domain, usize, usize)> {
        (0..DOMAINS.all().len()).prop_flat_map(|i| {
            let d = &DOMAINS.all()[i];
            (Just(d), 0..d.len(), 0..d.len())
        })
    }

    proptest! {
        #[test]
        fn prop_identity_conversion((d, a, _b) in domain_and_pair(), v in -1.0e6f64..1.0e6) {
            let u = &d.units()[a];
            prop_assume!(v != 0.0 || u.rule.is_invertible_at_zero());
            let out = convert_value(v, &u.name, &u.name, d).unwrap().unwrap();
            prop_assert!(close(out, v), "{} {}: {} -> {}", d.id, u.name, v, out);
        }

        #[test]
        fn prop_round_trip((d, a, b) in domain_and_pair(), v in 1.0e-3f64..1.0e6) {
            let ua = &d.units()[a];
            let ub = &d.units()[b];
            let there = convert_value(v, &ua.name, &ub.name, d).unwrap();
            prop_assume!(there.is_some());
            let back = convert_value(there.unwrap(), &ub.name, &ua.name, d).unwrap().unwrap();
            prop_assert!(close(back, v), "{}: {} {} -> {} -> {}", d.id, v, ua.name, ub.name, back);
        }
    }
}
