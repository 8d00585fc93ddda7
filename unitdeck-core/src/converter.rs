//! Converter trait

use crate::ConversionError;

/// Converts a raw keypad string between two named units.
///
/// `Ok(None)` means "nothing to show yet": unparseable input, a non-finite
/// result, or (for dynamic tables) a unit with no data behind it.
pub trait Converter {
    /// Identifier of the table this converter serves
    fn id(&self) -> &str;

    /// Fractional digits in formatted output
    fn precision(&self) -> usize;

    /// Default (from, to) pair for a freshly opened screen
    fn default_pair(&self) -> (String, String);

    fn convert(&self, raw_input: &str, from: &str, to: &str) -> Result<Option<String>, ConversionError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn precision(&self) -> usize {
        (**self).precision()
    }

    fn default_pair(&self) -> (String, String) {
        (**self).default_pair()
    }

    fn convert(&self, raw_input: &str, from: &str, to: &str) -> Result<Option<String>, ConversionError> {
        (**self).convert(raw_input, from, to)
    }
}
