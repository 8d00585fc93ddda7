//! Keypad input model
//!
//! A single-number entry field: digits append, at most one decimal point,
//! backspace trims, clear empties. Swap never touches the buffer; it is
//! reported back so the owning session can exchange its unit pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels as laid out on the on-screen keypad, row by row
pub const KEYPAD_LAYOUT: [&[&str]; 5] = [
    &["1", "2", "3"],
    &["4", "5", "6"],
    &["7", "8", "9"],
    &[".", "0", "⌫"],
    &["↔"],
];

/// One keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Decimal,
    Backspace,
    Swap,
    Clear,
}

impl Key {
    /// Digit key, `None` above 9
    pub fn digit(d: u8) -> Option<Key> {
        (d <= 9).then_some(Key::Digit(d))
    }

    /// Parse an on-screen label ("7", ".", "⌫", "↔", "C")
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "." => Some(Key::Decimal),
            "⌫" => Some(Key::Backspace),
            "↔" => Some(Key::Swap),
            "C" => Some(Key::Clear),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10).map(|d| Key::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::Decimal => ".".to_string(),
            Key::Backspace => "⌫".to_string(),
            Key::Swap => "↔".to_string(),
            Key::Clear => "C".to_string(),
        }
    }
}

/// What a key press did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Buffer text changed
    Changed,
    /// Key was rejected or had nothing to act on
    Unchanged,
    /// Buffer untouched; the unit pair should be exchanged
    Swap,
}

/// Decimal literal under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn has_decimal(&self) -> bool {
        self.text.contains('.')
    }

    /// Apply a key press
    pub fn apply(&mut self, key: Key) -> Edit {
        match key {
            Key::Digit(d) if d <= 9 => {
                self.text.push(char::from(b'0' + d));
                Edit::Changed
            }
            Key::Digit(_) => Edit::Unchanged,
            Key::Decimal => {
                if self.has_decimal() {
                    return Edit::Unchanged;
                }
                self.text.push('.');
                Edit::Changed
            }
            Key::Backspace => {
                if self.text.pop().is_some() { Edit::Changed } else { Edit::Unchanged }
            }
            Key::Clear => {
                if self.text.is_empty() {
                    return Edit::Unchanged;
                }
                self.text.clear();
                Edit::Changed
            }
            Key::Swap => Edit::Swap,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.text)
        }
    }
}
