//! Currencies, conversion rates and amount formatting

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported display currencies
///
/// Catalog prices are always stored in the base currency; sessions pick
/// which currency totals are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Cup,
    Usdt,
}

impl Currency {
    /// The currency catalog prices are denominated in
    pub const BASE: Currency = Currency::Cup;

    /// All supported currencies, in menu order
    pub const ALL: [Currency; 2] = [Currency::Cup, Currency::Usdt];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cup => "CUP",
            Currency::Usdt => "USDT",
        }
    }

    /// Parse a currency code, case-insensitive. Returns None for anything
    /// outside the supported set.
    pub fn from_code(code: &str) -> Option<Currency> {
        match code.trim().to_uppercase().as_str() {
            "CUP" => Some(Currency::Cup),
            "USDT" => Some(Currency::Usdt),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Conversion rates keyed by ordered (from, to) currency pair
///
/// Built once from configuration and shared by the cart engine. No rounding
/// happens here; amounts stay raw until [`format_amount`].
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<(Currency, Currency), f64>,
}

impl RateTable {
    /// Build the table from the configured CUP-per-USDT rate
    pub fn from_cup_per_usdt(cup_per_usdt: f64) -> Self {
        let mut rates = HashMap::new();
        rates.insert((Currency::Cup, Currency::Usdt), 1.0 / cup_per_usdt);
        rates.insert((Currency::Usdt, Currency::Cup), cup_per_usdt);
        Self { rates }
    }

    /// Convert an amount between currencies
    ///
    /// Identity pairs return the amount exactly. A pair missing from the
    /// table falls back to the unconverted amount; the function is total.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        if from == to {
            return amount;
        }
        match self.rates.get(&(from, to)) {
            Some(rate) => amount * rate,
            None => amount,
        }
    }
}

/// How a currency renders an amount
struct FormatRule {
    suffix: &'static str,
    /// Fixed decimal places, or None for the trimmed style: integer when the
    /// amount has no fractional part, one decimal otherwise
    decimals: Option<usize>,
}

const FORMAT_RULES: &[(Currency, FormatRule)] = &[
    (Currency::Cup, FormatRule { suffix: "$", decimals: None }),
    (Currency::Usdt, FormatRule { suffix: "USDT", decimals: Some(2) }),
];

/// Format an amount with its currency suffix
///
/// `1800.0 CUP` renders as `"1800 $"`, `1.5 CUP` as `"1.5 $"`, and USDT
/// always carries two decimals: `"75.00 USDT"`. A currency with no format
/// rule falls back to the raw number plus its code and never errors.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let rule = FORMAT_RULES
        .iter()
        .find(|(c, _)| *c == currency)
        .map(|(_, rule)| rule);

    match rule {
        Some(FormatRule { suffix, decimals: Some(places) }) => {
            format!("{:.*} {}", places, amount, suffix)
        }
        Some(FormatRule { suffix, decimals: None }) => {
            if amount.fract() == 0.0 {
                format!("{} {}", amount as i64, suffix)
            } else {
                format!("{:.1} {}", amount, suffix)
            }
        }
        None => format!("{} {}", amount, currency.code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::from_cup_per_usdt(400.0)
    }

    #[test]
    fn identity_conversion_is_exact() {
        let table = rates();
        for currency in Currency::ALL {
            assert_eq!(table.convert(123.45, currency, currency), 123.45);
        }
    }

    #[test]
    fn round_trip_stays_within_tolerance() {
        let table = rates();
        let amount = 1800.0;
        let there = table.convert(amount, Currency::Cup, Currency::Usdt);
        let back = table.convert(there, Currency::Usdt, Currency::Cup);
        assert!((back - amount).abs() < 1e-9, "got {}", back);
    }

    #[test]
    fn cup_to_usdt_uses_configured_rate() {
        let table = rates();
        let converted = table.convert(1800.0, Currency::Cup, Currency::Usdt);
        assert!((converted - 4.5).abs() < 1e-9);
    }

    #[test]
    fn formats_cup_without_decimals_when_whole() {
        assert_eq!(format_amount(1800.0, Currency::Cup), "1800 $");
    }

    #[test]
    fn formats_cup_with_one_decimal_when_fractional() {
        assert_eq!(format_amount(1.5, Currency::Cup), "1.5 $");
    }

    #[test]
    fn formats_usdt_with_two_decimals() {
        assert_eq!(format_amount(75.0, Currency::Usdt), "75.00 USDT");
        assert_eq!(format_amount(4.5, Currency::Usdt), "4.50 USDT");
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::from_code("usdt"), Some(Currency::Usdt));
        assert_eq!(Currency::from_code(" CUP "), Some(Currency::Cup));
        assert_eq!(Currency::from_code("EUR"), None);
        assert_eq!(Currency::from_code(""), None);
    }
}
