//! Product prices for the store listing.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::locale::Locale;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display in the given locale.
    ///
    /// Portuguese uses a decimal comma (`R$ 1.250,00`), English a decimal
    /// point (`R$ 1,250.00`). The currency symbol does not change with the
    /// locale.
    #[must_use]
    pub fn display(&self, locale: Locale) -> String {
        let rounded = self.amount.round_dp(2);
        let text = format!("{rounded:.2}");
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let (sign, digits) = int_part
            .strip_prefix('-')
            .map_or(("", int_part), |rest| ("-", rest));

        let (group_sep, decimal_sep) = match locale {
            Locale::Pt => ('.', ','),
            Locale::En => (',', '.'),
        };

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(c);
        }

        format!(
            "{} {sign}{grouped}{decimal_sep}{frac_part}",
            self.currency_code.symbol()
        )
    }
}

/// ISO 4217 currency codes accepted from the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "US$",
            Self::EUR => "€",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
        };
        f.write_str(code)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}
