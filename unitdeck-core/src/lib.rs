//! UnitDeck Core - Fundamental types
//!
//! This crate provides the types shared by every converter:
//! - `parse_magnitude` / `format_fixed`: keypad text to `f64` and back
//! - `InputBuffer` / `Key`: the keypad state machine
//! - `Converter`: the seam sessions drive
//! - `ConversionError`: contract violations (unknown unit, unknown domain)

mod magnitude;
mod keypad;
mod converter;
mod error;

pub use magnitude::{parse_magnitude, format_fixed, approx_eq, MagnitudeError};
pub use keypad::{Key, Edit, InputBuffer, KEYPAD_LAYOUT};
pub use converter::Converter;
pub use error::{ConversionError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Converter, ConversionError, InputBuffer, Key, Edit};
    pub use crate::{parse_magnitude, format_fixed};
}
