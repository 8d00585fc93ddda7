//! Conversion errors
//!
//! Only programming-contract violations are errors. Unparseable input and
//! non-finite results resolve to "no result" and never reach this type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_DOMAIN: &str = "UNKNOWN_DOMAIN";
    pub const INVALID_DOMAIN: &str = "INVALID_DOMAIN";
}

/// Errors raised by the conversion engine and domain tables
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConversionError {
    /// A unit name that the domain table does not define
    #[error("unknown unit '{unit}' in domain '{domain}'")]
    UnknownUnit { domain: String, unit: String },

    /// A domain id that the registry does not define
    #[error("unknown domain '{0}'")]
    UnknownDomain(String),

    /// A domain table that breaks its own invariants
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },
}

impl ConversionError {
    pub fn unknown_unit(domain: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit { domain: domain.into(), unit: unit.into() }
    }

    pub fn invalid_domain(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDomain { domain: domain.into(), reason: reason.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::UnknownDomain(_) => codes::UNKNOWN_DOMAIN,
            Self::InvalidDomain { .. } => codes::INVALID_DOMAIN,
        }
    }
}
