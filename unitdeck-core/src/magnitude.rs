//! Parsing and display of keypad magnitudes
//!
//! Magnitudes are plain `f64`. Parsing accepts the decimal literals a keypad
//! buffer can hold ("12", "12.", ".5") plus signed and exponent forms.
//! Anything that does not yield a finite number is "nothing to show yet",
//! never an error the user sees.

use thiserror::Error;

/// Why a raw input did not produce a usable magnitude
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MagnitudeError {
    #[error("Invalid number format: {0:?}")]
    ParseError(String),

    #[error("Non-finite value")]
    NonFinite,
}

/// Parse a keypad buffer into a finite magnitude.
/// Rejects "", ".", "-", "inf", "NaN" and other non-numeric text.
pub fn parse_magnitude(raw: &str) -> Result<f64, MagnitudeError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(MagnitudeError::ParseError(raw.to_string()));
    }

    // Rust accepts "inf"/"nan" spellings; a keypad never produces letters
    // other than an exponent marker.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return Err(MagnitudeError::ParseError(raw.to_string()));
    }

    let value: f64 = s.parse()
        .map_err(|_| MagnitudeError::ParseError(raw.to_string()))?;

    if !value.is_finite() {
        return Err(MagnitudeError::NonFinite);
    }
    Ok(value)
}

/// Format a magnitude with a fixed number of fractional digits.
/// Returns `None` for infinities and NaN so callers show a placeholder.
pub fn format_fixed(value: f64, places: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let text = format!("{:.*}", places, value);
    // -0.0 and tiny negatives that round to zero print as "-0.000000"
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        return Some(text[1..].to_string());
    }
    Some(text)
}

/// Relative closeness check used by round-trip assertions
pub fn approx_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    (a - b).abs() / scale <= rel_tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_magnitude("123").unwrap(), 123.0);
    }

    #[test]
    fn test_parse_keypad_forms() {
        assert_eq!(parse_magnitude("12.").unwrap(), 12.0);
        assert_eq!(parse_magnitude(".5").unwrap(), 0.5);
        assert_eq!(parse_magnitude("0.25").unwrap(), 0.25);
        assert_eq!(parse_magnitude("1.5e2").unwrap(), 150.0);
        assert_eq!(parse_magnitude("-4").unwrap(), -4.0);
    }

    #[test]
    fn test_parse_rejects_placeholders() {
        for raw in ["", ".", "-", "abc", " ", "1.2.3"] {
            assert!(
                matches!(parse_magnitude(raw), Err(MagnitudeError::ParseError(_))),
                "expected parse error for {:?}", raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_finite_spellings() {
        assert!(parse_magnitude("inf").is_err());
        assert!(parse_magnitude("NaN").is_err());
        assert!(parse_magnitude("-infinity").is_err());
    }

    #[test]
    fn test_parse_overflow_is_non_finite() {
        assert_eq!(parse_magnitude("1e400"), Err(MagnitudeError::NonFinite));
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1000.0, 6).unwrap(), "1000.000000");
        assert_eq!(format_fixed(9.0, 4).unwrap(), "9.0000");
        assert_eq!(format_fixed(0.1234567, 6).unwrap(), "0.123457");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_fixed(-0.0, 6).unwrap(), "0.000000");
        assert_eq!(format_fixed(-0.0000001, 4).unwrap(), "0.0000");
        assert_eq!(format_fixed(-1.5, 2).unwrap(), "-1.50");
    }

    #[test]
    fn test_format_non_finite() {
        assert!(format_fixed(f64::INFINITY, 6).is_none());
        assert!(format_fixed(f64::NEG_INFINITY, 6).is_none());
        assert!(format_fixed(f64::NAN, 6).is_none());
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-12, 1e-9));
        assert!(!approx_eq(1.0, 1.001, 1e-9));
        assert!(approx_eq(0.0, 0.0, 1e-9));
    }
}
