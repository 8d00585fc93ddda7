//! UnitDeck Units - Table-driven unit conversion
//!
//! Every static category is a `Domain`: an ordered list of units, each with a
//! rule relative to the domain's base unit. One engine converts for all of
//! them by going through the base unit.
//!
//! Domains:
//! - Angle, Area, Distance, Energy, Force, Power, Pressure
//! - Data Speed, Data Storage, Speed, Time, Torque, Volume, Weight
//! - Temperature (affine rules)
//! - Fuel Mileage (reciprocal rules for consumption units)

mod unit;
mod domain;
mod tables;
mod convert;

pub use unit::{Unit, Rule};
pub use domain::{Domain, DEFAULT_PRECISION};
pub use tables::{DOMAINS, DomainRegistry, normalize_id};
pub use convert::{convert, convert_value};
