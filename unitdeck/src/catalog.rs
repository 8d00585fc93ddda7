//! Home-screen catalog

use serde::Serialize;
use unitdeck_core::ConversionError;
use unitdeck_units::{normalize_id, Domain, DOMAINS};

/// Icon font a category icon comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSet {
    Material,
    MaterialCommunity,
}

/// What opening a category leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "domain", rename_all = "snake_case")]
pub enum CategoryKind {
    /// A static unit table, by domain id
    Units(&'static str),
    /// Live exchange rates
    Currency,
    /// Listed, but with no converter behind it
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub icon_set: IconSet,
    #[serde(flatten)]
    pub kind: CategoryKind,
}

impl Category {
    pub fn is_available(&self) -> bool {
        !matches!(self.kind, CategoryKind::Unavailable)
    }

    /// The unit table behind this category, if it has one
    pub fn domain(&self) -> Option<&'static Domain> {
        match self.kind {
            CategoryKind::Units(id) => DOMAINS.get(id),
            _ => None,
        }
    }
}

const fn units(name: &'static str, icon: &'static str, id: &'static str) -> Category {
    Category { name, icon, icon_set: IconSet::Material, kind: CategoryKind::Units(id) }
}

/// Categories in home-screen order
pub static CATALOG: &[Category] = &[
    units("Angle", "change-history", "angle"),
    units("Area", "crop", "area"),
    Category { name: "Currency", icon: "attach-money", icon_set: IconSet::Material, kind: CategoryKind::Currency },
    Category {
        name: "Data Speed",
        icon: "access-point-network",
        icon_set: IconSet::MaterialCommunity,
        kind: CategoryKind::Units("data-speed"),
    },
    units("Data Storage", "storage", "data-storage"),
    units("Distance", "straighten", "distance"),
    units("Energy", "flash-on", "energy"),
    units("Force", "fitness-center", "force"),
    units("Fuel Mileage", "local-gas-station", "fuel-mileage"),
    units("Power", "bolt", "power"),
    units("Pressure", "compress", "pressure"),
    Category {
        name: "Shoe Size",
        icon: "shoe-formal",
        icon_set: IconSet::MaterialCommunity,
        kind: CategoryKind::Unavailable,
    },
    units("Speed", "speed", "speed"),
    units("Temperature", "thermostat", "temperature"),
    units("Time", "access-time", "time"),
    units("Torque", "settings", "torque"),
    units("Volume", "invert-colors", "volume"),
    units("Weight", "fitness-center", "weight"),
];

pub fn categories() -> &'static [Category] {
    CATALOG
}

/// Find a category by display name or domain id, ignoring case and
/// separators
pub fn category(key: &str) -> Result<&'static Category, ConversionError> {
    let wanted = normalize_id(key);
    CATALOG.iter()
        .find(|c| {
            normalize_id(c.name) == wanted
                || matches!(c.kind, CategoryKind::Units(id) if id == wanted)
        })
        .ok_or_else(|| ConversionError::UnknownDomain(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(CATALOG.len(), 18);
        assert_eq!(CATALOG.iter().filter(|c| c.is_available()).count(), 17);
    }

    #[test]
    fn test_every_units_category_has_a_domain() {
        for c in CATALOG {
            if let CategoryKind::Units(id) = c.kind {
                let d = c.domain().unwrap_or_else(|| panic!("missing domain {id}"));
                assert_eq!(d.title, c.name);
            }
        }
    }

    #[test]
    fn test_every_domain_is_catalogued() {
        for d in DOMAINS.all() {
            assert!(category(&d.id).is_ok(), "{} not in catalog", d.id);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(category("fuel mileage").unwrap().name, "Fuel Mileage");
        assert_eq!(category("data-speed").unwrap().name, "Data Speed");
        assert_eq!(category("Currency").unwrap().kind, CategoryKind::Currency);
        assert!(!category("Shoe Size").unwrap().is_available());
        assert_eq!(
            category("Luminosity"),
            Err(ConversionError::UnknownDomain("Luminosity".to_string()))
        );
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(category("Distance").unwrap()).unwrap();
        assert_eq!(json["name"], "Distance");
        assert_eq!(json["kind"], "units");
        assert_eq!(json["domain"], "distance");
        assert_eq!(json["icon_set"], "material");

        let json = serde_json::to_value(category("Currency").unwrap()).unwrap();
        assert_eq!(json["kind"], "currency");
    }
}
