//! Domain tables - every static conversion category, in display order

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;
use unitdeck_core::ConversionError;
use crate::{Domain, Unit};

/// Global domain registry
pub static DOMAINS: LazyLock<DomainRegistry> = LazyLock::new(DomainRegistry::new);

/// Registry of all static domains
pub struct DomainRegistry {
    domains: Vec<Domain>,
    aliases: HashMap<String, usize>,
}

/// Normalize a domain key: "Fuel Mileage", "fuel_mileage" -> "fuel-mileage"
pub fn normalize_id(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
}

impl DomainRegistry {
    pub fn new() -> Self {
        let mut registry = DomainRegistry {
            domains: Vec::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_domains();
        registry
    }

    /// Get a domain by id, title, or alias
    pub fn get(&self, key: &str) -> Option<&Domain> {
        self.aliases.get(&normalize_id(key)).map(|&i| &self.domains[i])
    }

    /// Look up a domain, failing with `UnknownDomain`
    pub fn domain(&self, key: &str) -> Result<&Domain, ConversionError> {
        self.get(key)
            .ok_or_else(|| ConversionError::UnknownDomain(key.to_string()))
    }

    /// All domains in registration order
    pub fn all(&self) -> &[Domain] {
        &self.domains
    }

    pub fn ids(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.id.as_str()).collect()
    }

    fn register(&mut self, domain: Domain) {
        debug_assert!(domain.validate().is_ok(), "invalid domain table: {}", domain.id);
        let index = self.domains.len();
        self.aliases.insert(normalize_id(&domain.id), index);
        self.aliases.insert(normalize_id(&domain.title), index);
        self.domains.push(domain);
    }

    fn alias(&mut self, alias: &str, id: &str) {
        if let Some(&index) = self.aliases.get(&normalize_id(id)) {
            self.aliases.insert(normalize_id(alias), index);
        }
    }

    fn register_all_domains(&mut self) {
        self.register(angle());
        self.register(area());
        self.register(data_speed());
        self.register(data_storage());
        self.register(distance());
        self.register(energy());
        self.register(force());
        self.register(fuel_mileage());
        self.register(power());
        self.register(pressure());
        self.register(speed());
        self.register(temperature());
        self.register(time());
        self.register(torque());
        self.register(volume());
        self.register(weight());

        self.alias("length", "distance");
        self.alias("mass", "weight");
        self.alias("fuel", "fuel-mileage");
        self.alias("fuel-economy", "fuel-mileage");
        self.alias("velocity", "speed");
        self.alias("data", "data-storage");
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============ angle ============

fn angle() -> Domain {
    let rad = 180.0 / PI;
    Domain::new("angle", "Angle", "Degrees", vec![
        Unit::linear("Degrees", 1.0),
        Unit::linear("Radians", rad),
        Unit::linear("Gradians", 0.9),
        Unit::linear("Turns", 360.0),
        Unit::linear("Arcminutes", 1.0 / 60.0),
        Unit::linear("Arcseconds", 1.0 / 3600.0),
        Unit::linear("Milliradians", rad / 1000.0),
        Unit::linear("Microradians", rad / 1e6),
        // Angular nautical mile: one arcminute of a great circle
        Unit::linear("Nautical Miles", 1.0 / 60.0),
        Unit::linear("Sextants", 60.0),
        Unit::linear("Points", 11.25),
        Unit::linear("Quadrants", 90.0),
    ])
    .with_defaults("Degrees", "Radians")
}

// ============ area ============

fn area() -> Domain {
    Domain::new("area", "Area", "Square Meters", vec![
        Unit::linear("Square Meters", 1.0),
        Unit::linear("Square Kilometers", 1e6),
        Unit::linear("Square Decimeters", 0.01),
        Unit::linear("Square Centimeters", 0.0001),
        Unit::linear("Square Millimeters", 1e-6),
        Unit::linear("Hectares", 10000.0),
        Unit::linear("Acres", 4046.8564224),
        Unit::linear("Square Miles", 2.589988110336e6),
        Unit::linear("Square Yards", 0.83612736),
        Unit::linear("Square Feet", 0.09290304),
        Unit::linear("Square Inches", 0.00064516),
        Unit::linear("Ares", 100.0),
        Unit::linear("Barns", 1e-28),
    ])
    .with_defaults("Square Meters", "Square Kilometers")
}

// ============ data speed ============

fn data_speed() -> Domain {
    Domain::new("data-speed", "Data Speed", "Bits per Second", vec![
        Unit::linear("Bits per Second", 1.0),
        Unit::linear("Kilobits per Second", 1e3),
        Unit::linear("Megabits per Second", 1e6),
        Unit::linear("Gigabits per Second", 1e9),
        Unit::linear("Terabits per Second", 1e12),
        Unit::linear("Bytes per Second", 8.0),
        Unit::linear("Kilobytes per Second", 8e3),
        Unit::linear("Megabytes per Second", 8e6),
        Unit::linear("Gigabytes per Second", 8e9),
        Unit::linear("Terabytes per Second", 8e12),
    ])
    .with_defaults("Megabits per Second", "Megabytes per Second")
}

// ============ data storage ============

fn data_storage() -> Domain {
    Domain::new("data-storage", "Data Storage", "Bytes", vec![
        Unit::linear("Bits", 0.125),
        Unit::linear("Bytes", 1.0),
        Unit::linear("Kilobytes", 1e3),
        Unit::linear("Megabytes", 1e6),
        Unit::linear("Gigabytes", 1e9),
        Unit::linear("Terabytes", 1e12),
        Unit::linear("Petabytes", 1e15),
        Unit::linear("Kibibytes", 1024.0),
        Unit::linear("Mebibytes", 1_048_576.0),
        Unit::linear("Gibibytes", 1_073_741_824.0),
        Unit::linear("Tebibytes", 1_099_511_627_776.0),
    ])
    .with_defaults("Megabytes", "Gigabytes")
}

// ============ distance ============

fn distance() -> Domain {
    Domain::new("distance", "Distance", "Meters", vec![
        Unit::linear("Meters", 1.0),
        Unit::linear("Kilometers", 1000.0),
        Unit::linear("Miles", 1609.344),
        Unit::linear("Yards", 0.9144),
        Unit::linear("Feet", 0.3048),
        Unit::linear("Inches", 0.0254),
        Unit::linear("Nautical Miles", 1852.0),
        Unit::linear("Light Years", 9.4607e15),
        Unit::linear("Parsecs", 3.0857e16),
        Unit::linear("Centimeters", 0.01),
        Unit::linear("Millimeters", 0.001),
        Unit::linear("Micrometers", 1e-6),
        Unit::linear("Nanometers", 1e-9),
        Unit::linear("Decimeters", 0.1),
        Unit::linear("Leagues", 4828.032),
        Unit::linear("Furlongs", 201.168),
        Unit::linear("Chains", 20.1168),
        Unit::linear("Rod", 5.0292),
        Unit::linear("Link", 0.201168),
        Unit::linear("Astronomical Units", 1.495978707e11),
    ])
    .with_defaults("Meters", "Kilometers")
}

// ============ energy ============

fn energy() -> Domain {
    Domain::new("energy", "Energy", "Joules", vec![
        Unit::linear("Joules", 1.0),
        Unit::linear("Kilojoules", 1e3),
        Unit::linear("Megajoules", 1e6),
        Unit::linear("Gigajoules", 1e9),
        Unit::linear("Terajoules", 1e12),
        Unit::linear("Petajoules", 1e15),
        Unit::linear("Exajoules", 1e18),
        Unit::linear("Zettajoules", 1e21),
        Unit::linear("Yottajoules", 1e24),
        Unit::linear("Calories", 4.184),
        Unit::linear("Kilocalories", 4184.0),
        Unit::linear("Watt-hours", 3600.0),
        Unit::linear("Kilowatt-hours", 3.6e6),
        Unit::linear("Megawatt-hours", 3.6e9),
        Unit::linear("Gigawatt-hours", 3.6e12),
        Unit::linear("British Thermal Units (BTU)", 1055.05585),
        Unit::linear("Electronvolts", 1.602176634e-19),
        Unit::linear("Foot-pounds", 1.3558179483314),
        Unit::linear("Therms", 1.05506e8),
    ])
    .with_defaults("Joules", "Kilojoules")
}

// ============ force ============

fn force() -> Domain {
    Domain::new("force", "Force", "Newtons", vec![
        Unit::linear("Newtons", 1.0),
        Unit::linear("Kilonewtons", 1e3),
        Unit::linear("Meganewtons", 1e6),
        Unit::linear("Dynes", 1e-5),
        Unit::linear("Pound-force", 4.4482216152605),
        Unit::linear("Ounce-force", 0.27801385095378125),
        Unit::linear("Kilogram-force", 9.80665),
        Unit::linear("Gram-force", 0.00980665),
        Unit::linear("Poundals", 0.138254954376),
        Unit::linear("Kips", 4448.2216152605),
    ])
    .with_defaults("Newtons", "Pound-force")
}

// ============ fuel mileage ============

/// Kilometers per mile
const KM_PER_MILE: f64 = 1.609344;
/// Liters per imperial gallon
const LITERS_PER_UK_GALLON: f64 = 4.54609;
/// kWh in one US gallon of gasoline (EPA MPGe basis)
const KWH_PER_GALLON_EQUIV: f64 = 33.705;
/// Miles per kilometer as used by the consumption rules
const MILES_PER_KM: f64 = 0.621371;

fn fuel_mileage() -> Domain {
    Domain::new("fuel-mileage", "Fuel Mileage", "Kilometers per Liter", vec![
        Unit::linear("Miles per US Gallon", 0.425144),
        Unit::linear("Miles per UK Gallon", 0.354006),
        Unit::linear("Kilometers per Liter", 1.0),
        Unit::reciprocal("Liters per Kilometer", 1.0),
        Unit::reciprocal("Liters per 100 Kilometers", 100.0),
        Unit::reciprocal("US Gallons per 100 Miles", 42.5144),
        Unit::reciprocal("UK Gallons per 100 Kilometers", 100.0 * KM_PER_MILE / LITERS_PER_UK_GALLON),
        Unit::linear("MPGe (US)", 0.425144),
        Unit::linear("MPGe (UK)", 0.354006),
        Unit::reciprocal("Kwh per Mile", KWH_PER_GALLON_EQUIV / MILES_PER_KM),
        Unit::reciprocal("Kwh per 100 Miles", 100.0 * KWH_PER_GALLON_EQUIV / MILES_PER_KM),
        Unit::reciprocal("Kwh per 100 Kilometers", 100.0 * KWH_PER_GALLON_EQUIV),
        Unit::linear("Miles per Kwh", MILES_PER_KM),
        Unit::linear("Kilometers per Kwh", 1.0),
    ])
    .with_defaults("Miles per US Gallon", "Kilometers per Liter")
}

// ============ power ============

fn power() -> Domain {
    Domain::new("power", "Power", "Watts", vec![
        Unit::linear("Watts", 1.0),
        Unit::linear("Kilowatts", 1e3),
        Unit::linear("Megawatts", 1e6),
        Unit::linear("Gigawatts", 1e9),
        Unit::linear("Horsepower", 745.699872),
        Unit::linear("BTU per hour", 0.29307107),
        Unit::linear("Calorie per second", 4.184),
        Unit::linear("Tons of Refrigeration", 3516.8528421),
    ])
    .with_defaults("Watts", "Kilowatts")
}

// ============ pressure ============

fn pressure() -> Domain {
    Domain::new("pressure", "Pressure", "Pascals", vec![
        Unit::linear("Pascals", 1.0),
        Unit::linear("Bars", 1e5),
        Unit::linear("Millibars", 100.0),
        Unit::linear("Atmospheres", 101325.0),
        Unit::linear("Torr", 133.322368),
        Unit::linear("Inches of Mercury", 3386.389),
        Unit::linear("Pounds per Square Inch", 6894.75729),
        Unit::linear("Pounds per Square Foot", 47.880258),
        Unit::linear("Kilopascals", 1000.0),
        Unit::linear("Megapascals", 1e6),
        Unit::linear("Inches of Water", 249.08891),
        Unit::linear("Millimeters of Mercury", 133.322368),
    ])
    .with_defaults("Pascals", "Bars")
}

// ============ speed ============

fn speed() -> Domain {
    Domain::new("speed", "Speed", "Meters per Second", vec![
        Unit::linear("Meters per Second", 1.0),
        Unit::linear("Kilometers per Hour", 1.0 / 3.6),
        Unit::linear("Miles per Hour", 0.44704),
        Unit::linear("Feet per Second", 0.3048),
        Unit::linear("Knots", 1852.0 / 3600.0),
        // Speed of sound in dry air at 20 °C
        Unit::linear("Mach", 343.0),
        Unit::linear("Speed of Light", 299_792_458.0),
    ])
    .with_defaults("Kilometers per Hour", "Miles per Hour")
}

// ============ temperature ============

fn temperature() -> Domain {
    let f = 5.0 / 9.0;
    Domain::new("temperature", "Temperature", "Kelvin", vec![
        Unit::affine("Celsius", 1.0, 273.15),
        Unit::affine("Fahrenheit", f, 273.15 - 32.0 * f),
        Unit::linear("Kelvin", 1.0),
        Unit::linear("Rankine", f),
    ])
    .with_defaults("Celsius", "Fahrenheit")
}

// ============ time ============

fn time() -> Domain {
    Domain::new("time", "Time", "Seconds", vec![
        Unit::linear("Seconds", 1.0),
        Unit::linear("Minutes", 60.0),
        Unit::linear("Hours", 3600.0),
        Unit::linear("Days", 86400.0),
        Unit::linear("Weeks", 604800.0),
        // Average month (30.44 days) and Julian year (365.25 days)
        Unit::linear("Months", 2629800.0),
        Unit::linear("Years", 31557600.0),
        Unit::linear("Decades", 315576000.0),
        Unit::linear("Centuries", 3155760000.0),
        Unit::linear("Milliseconds", 1e-3),
        Unit::linear("Microseconds", 1e-6),
        Unit::linear("Nanoseconds", 1e-9),
        Unit::linear("Picoseconds", 1e-12),
        Unit::linear("Femtoseconds", 1e-15),
        Unit::linear("Attoseconds", 1e-18),
        Unit::linear("Planck Time", 5.391247e-44),
    ])
    .with_defaults("Seconds", "Minutes")
}

// ============ torque ============

fn torque() -> Domain {
    Domain::new("torque", "Torque", "Newton-meter", vec![
        Unit::linear("Newton-meter", 1.0),
        Unit::linear("Newton-centimeter", 0.01),
        Unit::linear("Kilogram-force meter", 9.80665),
        Unit::linear("Kilogram-force centimeter", 0.0980665),
        Unit::linear("Pound-foot", 1.3558179483),
        Unit::linear("Pound-inch", 0.112984829),
        Unit::linear("Ounce-inch", 0.0070615518),
        Unit::linear("Dyne-centimeter", 1e-7),
        Unit::linear("Dyne-meter", 1e-5),
        Unit::linear("Kilonewton-meter", 1000.0),
        Unit::linear("Millinewton-meter", 0.001),
        Unit::linear("Gram-force meter", 0.00980665),
        Unit::linear("Kilopound-foot", 1355.8179483),
    ])
    .with_defaults("Newton-meter", "Kilogram-force meter")
}

// ============ volume ============

fn volume() -> Domain {
    // US customary measures unless named otherwise
    Domain::new("volume", "Volume", "Liters", vec![
        Unit::linear("Milliliters", 0.001),
        Unit::linear("Liters", 1.0),
        Unit::linear("Deciliters", 0.1),
        Unit::linear("Centiliters", 0.01),
        Unit::linear("Cubic Milliliters", 1e-6),
        Unit::linear("Cubic Centimeters", 0.001),
        Unit::linear("Cubic Meters", 1000.0),
        Unit::linear("Cubic Inches", 0.016387064),
        Unit::linear("Cubic Feet", 28.3168466),
        Unit::linear("Cubic Yards", 764.554858),
        Unit::linear("Pints", 0.473176473),
        Unit::linear("Quarts", 0.946352946),
        Unit::linear("Gallons", 3.785411784),
        Unit::linear("Fluid Ounces", 0.0295735296),
        Unit::linear("Teaspoons", 0.00492892159),
        Unit::linear("Tablespoons", 0.0147867648),
        Unit::linear("Drops", 0.00005),
        Unit::linear("Barrels", 158.987295),
        Unit::linear("Hogsheads", 238.480942),
        Unit::linear("Hectoliters", 100.0),
        Unit::linear("Cups", 0.236588236),
        Unit::linear("Minims", 0.0000616115),
        Unit::linear("Gills", 0.118294118),
        Unit::linear("Cord", 3636.8729),
        Unit::linear("Board Feet", 0.002359737),
        Unit::linear("Acre-Feet", 1233481.84),
        Unit::linear("Bushels", 35.2390702),
        Unit::linear("Pecks", 8.80976754),
    ])
    .with_defaults("Milliliters", "Liters")
}

// ============ weight ============

fn weight() -> Domain {
    Domain::new("weight", "Weight", "Kilograms", vec![
        Unit::linear("Kilograms", 1.0),
        Unit::linear("Grams", 0.001),
        Unit::linear("Milligrams", 1e-6),
        Unit::linear("Micrograms", 1e-9),
        Unit::linear("Metric Tons", 1000.0),
        Unit::linear("Pounds", 0.45359237),
        Unit::linear("Ounces", 0.028349523125),
        Unit::linear("Stones", 6.35029318),
        Unit::linear("US Tons", 907.18474),
        Unit::linear("UK Tons", 1016.0469088),
        Unit::linear("Carats", 0.0002),
        Unit::linear("Grains", 0.00006479891),
    ])
    .with_defaults("Kilograms", "Pounds")
}
