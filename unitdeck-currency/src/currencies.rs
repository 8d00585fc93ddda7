//! Currency metadata for pickers: code, display name, and the country whose
//! flag represents it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code
    pub code: &'static str,
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 region used for the flag
    pub country: &'static str,
}

impl CurrencyInfo {
    pub fn flag(&self) -> String {
        flag_emoji(self.country)
    }

    /// Picker row, e.g. "🇺🇸 USD - US Dollar"
    pub fn label(&self) -> String {
        format!("{} {} - {}", self.flag(), self.code, self.name)
    }
}

macro_rules! currency {
    ($code:literal, $name:literal, $country:literal) => {
        CurrencyInfo { code: $code, name: $name, country: $country }
    };
}

/// Known currencies in picker order
pub static CURRENCIES: &[CurrencyInfo] = &[
    currency!("USD", "US Dollar", "US"),
    currency!("EUR", "Euro", "EU"),
    currency!("GBP", "British Pound", "GB"),
    currency!("JPY", "Japanese Yen", "JP"),
    currency!("CNY", "Chinese Yuan", "CN"),
    currency!("INR", "Indian Rupee", "IN"),
    currency!("CAD", "Canadian Dollar", "CA"),
    currency!("AUD", "Australian Dollar", "AU"),
    currency!("NZD", "New Zealand Dollar", "NZ"),
    currency!("CHF", "Swiss Franc", "CH"),
    currency!("SEK", "Swedish Krona", "SE"),
    currency!("NOK", "Norwegian Krone", "NO"),
    currency!("DKK", "Danish Krone", "DK"),
    currency!("PLN", "Polish Zloty", "PL"),
    currency!("CZK", "Czech Koruna", "CZ"),
    currency!("HUF", "Hungarian Forint", "HU"),
    currency!("RON", "Romanian Leu", "RO"),
    currency!("TRY", "Turkish Lira", "TR"),
    currency!("RUB", "Russian Ruble", "RU"),
    currency!("UAH", "Ukrainian Hryvnia", "UA"),
    currency!("ILS", "Israeli New Shekel", "IL"),
    currency!("AED", "UAE Dirham", "AE"),
    currency!("SAR", "Saudi Riyal", "SA"),
    currency!("QAR", "Qatari Riyal", "QA"),
    currency!("EGP", "Egyptian Pound", "EG"),
    currency!("ZAR", "South African Rand", "ZA"),
    currency!("NGN", "Nigerian Naira", "NG"),
    currency!("KES", "Kenyan Shilling", "KE"),
    currency!("MAD", "Moroccan Dirham", "MA"),
    currency!("BRL", "Brazilian Real", "BR"),
    currency!("MXN", "Mexican Peso", "MX"),
    currency!("ARS", "Argentine Peso", "AR"),
    currency!("CLP", "Chilean Peso", "CL"),
    currency!("COP", "Colombian Peso", "CO"),
    currency!("PEN", "Peruvian Sol", "PE"),
    currency!("KRW", "South Korean Won", "KR"),
    currency!("HKD", "Hong Kong Dollar", "HK"),
    currency!("TWD", "New Taiwan Dollar", "TW"),
    currency!("SGD", "Singapore Dollar", "SG"),
    currency!("MYR", "Malaysian Ringgit", "MY"),
    currency!("THB", "Thai Baht", "TH"),
    currency!("IDR", "Indonesian Rupiah", "ID"),
    currency!("PHP", "Philippine Peso", "PH"),
    currency!("VND", "Vietnamese Dong", "VN"),
    currency!("PKR", "Pakistani Rupee", "PK"),
    currency!("BDT", "Bangladeshi Taka", "BD"),
    currency!("LKR", "Sri Lankan Rupee", "LK"),
];

/// Look up metadata by code (case-insensitive)
pub fn find(code: &str) -> Option<&'static CurrencyInfo> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Case-insensitive substring match on code or name. An empty query
/// matches everything.
pub fn search(query: &str) -> Vec<&'static CurrencyInfo> {
    let needle = query.trim().to_lowercase();
    CURRENCIES.iter()
        .filter(|c| {
            needle.is_empty()
                || c.code.to_lowercase().contains(&needle)
                || c.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Regional-indicator flag for a two-letter region code.
/// Characters outside A-Z are dropped.
pub fn flag_emoji(country: &str) -> String {
    const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1E6 - 'A' as u32;
    country.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .filter_map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<_> = CURRENCIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), CURRENCIES.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("usd").map(|c| c.name), Some("US Dollar"));
        assert!(find("XYZ").is_none());
    }

    #[test]
    fn test_search_code_and_name() {
        let hits: Vec<_> = search("eur").iter().map(|c| c.code).collect();
        assert_eq!(hits, vec!["EUR"]);

        let hits: Vec<_> = search("Dollar").iter().map(|c| c.code).collect();
        assert!(hits.contains(&"USD"));
        assert!(hits.contains(&"SGD"));
        assert!(!hits.contains(&"EUR"));

        assert_eq!(search("").len(), CURRENCIES.len());
        assert!(search("zzzz").is_empty());
    }

    #[test]
    fn test_flag_emoji() {
        assert_eq!(flag_emoji("US"), "🇺🇸");
        assert_eq!(flag_emoji("gb"), "🇬🇧");
        assert_eq!(flag_emoji("EU"), "🇪🇺");
        assert_eq!(flag_emoji(""), "");
    }

    #[test]
    fn test_label() {
        assert_eq!(find("JPY").unwrap().label(), "🇯🇵 JPY - Japanese Yen");
    }
}
