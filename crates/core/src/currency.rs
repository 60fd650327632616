//! Currency codes and display formatting.
//!
//! Formatting is total: when the locale or the currency is not supported the
//! amount is rendered as `$<amount with two decimals> <code>` instead.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::money::{MINOR_PER_MAJOR, Money};

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "es-MX";

/// ISO 4217 alphabetic currency code (`MXN`, `USD`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a three-letter code. Lowercase input is accepted and normalized.
    pub fn parse(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "currency code must be three ASCII letters, got {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn mxn() -> Self {
        Self("MXN".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::mxn()
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// Display rules for a supported currency.
#[derive(Debug, Clone, Copy)]
struct CurrencyRule {
    code: &'static str,
    symbol: &'static str,
    fraction_digits: u8,
}

const RULES: &[CurrencyRule] = &[
    CurrencyRule { code: "MXN", symbol: "$", fraction_digits: 2 },
    CurrencyRule { code: "USD", symbol: "US$", fraction_digits: 2 },
    CurrencyRule { code: "CAD", symbol: "CA$", fraction_digits: 2 },
    CurrencyRule { code: "EUR", symbol: "€", fraction_digits: 2 },
    CurrencyRule { code: "GBP", symbol: "£", fraction_digits: 2 },
    CurrencyRule { code: "BRL", symbol: "R$", fraction_digits: 2 },
    CurrencyRule { code: "COP", symbol: "COL$", fraction_digits: 2 },
    CurrencyRule { code: "JPY", symbol: "¥", fraction_digits: 0 },
];

fn rule_for(code: &CurrencyCode) -> Option<&'static CurrencyRule> {
    RULES.iter().find(|r| r.code == code.as_str())
}

/// Locale-aware currency formatter.
///
/// Built from a locale name; an unknown name yields a formatter that always
/// uses the fixed fallback rendering.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormatter {
    locale: Option<Locale>,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(Locale::es_MX)
    }
}

impl CurrencyFormatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
        }
    }

    /// Accepts both `es-MX` and `es_MX` spellings.
    pub fn for_locale_name(name: &str) -> Self {
        let parsed = Locale::from_name(name).or_else(|_| Locale::from_name(name.replace('_', "-")));
        match parsed {
            Ok(locale) => Self::new(locale),
            Err(err) => {
                tracing::warn!(locale = name, error = %err, "unsupported locale; currency output will use fallback format");
                Self { locale: None }
            }
        }
    }

    /// Format `amount` in `currency_code`. Never fails.
    pub fn format(&self, amount: Money, currency_code: &str) -> String {
        match self.try_format(amount, currency_code) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(currency = currency_code, error = %err, "currency formatting failed; using fallback");
                fallback_format(amount, currency_code)
            }
        }
    }

    fn try_format(&self, amount: Money, currency_code: &str) -> DomainResult<String> {
        let locale = self
            .locale
            .ok_or_else(|| DomainError::validation("no locale available"))?;
        let code = CurrencyCode::parse(currency_code)?;
        let rule = rule_for(&code)
            .ok_or_else(|| DomainError::validation(format!("unsupported currency {code}")))?;

        if rule.fraction_digits == 0 {
            let rounded = amount.minor().saturating_add(MINOR_PER_MAJOR / 2) / MINOR_PER_MAJOR;
            return Ok(format!("{}{}", rule.symbol, rounded.to_formatted_string(&locale)));
        }

        Ok(format!(
            "{}{}{}{:02}",
            rule.symbol,
            amount.major_part().to_formatted_string(&locale),
            locale.decimal(),
            amount.minor_part()
        ))
    }
}

/// Fixed last-resort rendering: `$1096.00 XYZ`.
pub fn fallback_format(amount: Money, currency_code: &str) -> String {
    format!("${amount} {currency_code}")
}

/// Format with the default (`es-MX`) formatter.
pub fn format(amount: Money, currency_code: &str) -> String {
    CurrencyFormatter::default().format(amount, currency_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mxn_with_grouping() {
        assert_eq!(format(Money::from_major(1096), "MXN"), "$1,096.00");
        assert_eq!(format(Money::from_minor(34_950), "MXN"), "$349.50");
        assert_eq!(format(Money::ZERO, "MXN"), "$0.00");
    }

    #[test]
    fn lowercase_code_is_accepted() {
        assert_eq!(format(Money::from_major(99), "mxn"), "$99.00");
    }

    #[test]
    fn zero_fraction_currency_rounds() {
        assert_eq!(format(Money::from_minor(1_050), "JPY"), "¥11");
    }

    #[test]
    fn unsupported_code_falls_back() {
        assert_eq!(format(Money::from_major(1096), "XYZ"), "$1096.00 XYZ");
    }

    #[test]
    fn malformed_code_falls_back() {
        assert_eq!(format(Money::from_minor(150), "pesos"), "$1.50 pesos");
        assert_eq!(format(Money::from_minor(150), ""), "$1.50 ");
    }

    #[test]
    fn unknown_locale_falls_back() {
        let f = CurrencyFormatter::for_locale_name("xx-NOPE");
        assert_eq!(f.format(Money::from_major(5), "MXN"), "$5.00 MXN");
    }

    #[test]
    fn comma_decimal_locale_groups_with_dots() {
        let f = CurrencyFormatter::for_locale_name("de");
        assert_eq!(f.format(Money::from_minor(109_650), "EUR"), "€1.096,50");
        assert_eq!(f.format(Money::from_minor(5), "EUR"), "€0,05");
    }

    #[test]
    fn other_currencies_use_their_symbol() {
        let en = CurrencyFormatter::for_locale_name("en");
        assert_eq!(en.format(Money::from_major(1096), "USD"), "US$1,096.00");
        assert_eq!(format(Money::from_major(1096), "USD"), "US$1,096.00");
        assert_eq!(format(Money::from_minor(24_999), "gbp"), "£249.99");
    }

    #[test]
    fn currency_code_parse_normalizes() {
        assert_eq!(CurrencyCode::parse(" usd ").unwrap().as_str(), "USD");
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: formatting never panics, whatever the code.
            #[test]
            fn format_is_total(minor in any::<u64>(), code in ".{0,8}") {
                let out = format(Money::from_minor(minor), &code);
                prop_assert!(!out.is_empty());
            }
        }
    }
}
