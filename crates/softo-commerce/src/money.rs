//! Money type for representing monetary values.
//!
//! Amounts are held as integer hundredths of a unit for every currency, so
//! line totals and cart totals add up exactly and a price with cents survives
//! a round trip even in a currency displayed without decimals. The storefront
//! API and the persisted cart still speak plain JSON numbers; conversion
//! happens at those edges via [`Money::from_decimal`] and [`Money::to_decimal`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Iraqi dinar. Priced in whole dinars on the storefront.
    #[default]
    IQD,
    USD,
    EUR,
    TRY,
}

impl Currency {
    /// Get the currency code (e.g., "IQD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IQD => "IQD",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::TRY => "TRY",
        }
    }

    /// Get the currency symbol as shown next to prices.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IQD => "IQD ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::TRY => "\u{20ba}",
        }
    }

    /// Number of decimal places shown when displaying this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::IQD => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "IQD" => Some(Currency::IQD),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "TRY" => Some(Currency::TRY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Minor units per whole unit, in every currency.
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

const MINOR_UNIT_PLACES: u32 = 2;

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in hundredths of a unit.
    pub minor_units: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Create a Money value from whole units.
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(MINOR_UNITS_PER_UNIT), currency)
    }

    /// Create a Money value from a decimal amount, rounded to hundredths.
    ///
    /// Non-finite input maps to zero; the `as` cast saturates out-of-range
    /// values.
    ///
    /// ```
    /// use softo_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(12.5, Currency::IQD);
    /// assert_eq!(price.minor_units, 1250);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Self::zero(currency);
        }
        let minor_units = (amount * MINOR_UNITS_PER_UNIT as f64).round() as i64;
        Self::new(minor_units, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.minor_units as f64 / MINOR_UNITS_PER_UNIT as f64
    }

    /// Format as a display string with the currency symbol (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format the amount in the currency's precision, without symbol.
    pub fn display_amount(&self) -> String {
        self.format_places(self.currency.decimal_places())
    }

    /// Format the amount rounded to whole units, halves away from zero
    /// (e.g., "50" for 49.99, "13" for 12.50).
    pub fn display_whole(&self) -> String {
        self.format_places(0)
    }

    fn format_places(&self, places: u32) -> String {
        let places = places.min(MINOR_UNIT_PLACES);
        let step = 10_i64.pow(MINOR_UNIT_PLACES - places);
        let scaled = div_round_half_away(self.minor_units, step);
        let sign = if scaled < 0 { "-" } else { "" };
        let abs = scaled.unsigned_abs();
        if places == 0 {
            return format!("{sign}{abs}");
        }
        let unit = 10_u64.pow(places);
        format!(
            "{sign}{}.{:0width$}",
            abs / unit,
            abs % unit,
            width = places as usize
        )
    }

    /// Re-label the amount in another currency. No exchange rate is applied.
    pub fn in_currency(&self, currency: Currency) -> Money {
        Money::new(self.minor_units, currency)
    }

    /// Add an amount, saturating at the `i64` bounds. The result keeps
    /// `self`'s currency.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.minor_units.saturating_add(other.minor_units),
            self.currency,
        )
    }

    /// Multiply by a quantity, saturating at the `i64` bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.minor_units.saturating_mul(factor), self.currency)
    }
}

fn div_round_half_away(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient.saturating_add(value.signum())
    } else {
        quotient
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor_units() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.minor_units, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.minor_units, 4999);

        let m = Money::from_decimal(25000.0, Currency::IQD);
        assert_eq!(m, Money::from_major(25000, Currency::IQD));

        let m = Money::from_decimal(12.5, Currency::IQD);
        assert_eq!(m.minor_units, 1250);
        assert_eq!(m.to_decimal(), 12.5);
    }

    #[test]
    fn test_money_from_non_finite_decimal() {
        assert!(Money::from_decimal(f64::NAN, Currency::IQD).is_zero());
        assert!(Money::from_decimal(f64::INFINITY, Currency::USD).is_zero());
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
        assert_eq!(m.display_whole(), "50");

        let m = Money::from_major(25000, Currency::IQD);
        assert_eq!(m.display(), "IQD 25000");
        assert_eq!(Money::new(-705, Currency::USD).display_amount(), "-7.05");
    }

    #[test]
    fn test_display_whole_rounds_half_away_from_zero() {
        assert_eq!(Money::new(1250, Currency::USD).display_whole(), "13");
        assert_eq!(Money::new(1249, Currency::USD).display_whole(), "12");
        assert_eq!(Money::new(-1250, Currency::USD).display_whole(), "-13");
        assert_eq!(Money::new(250, Currency::IQD).display_whole(), "3");
        assert_eq!(Money::new(1250, Currency::IQD).display(), "IQD 13");
    }

    #[test]
    fn test_money_saturating_add_and_relabel() {
        let iqd = Money::new(1000, Currency::IQD);
        assert_eq!(iqd.saturating_add(&iqd).minor_units, 2000);
        assert_eq!(
            Money::new(i64::MAX, Currency::IQD).saturating_add(&iqd).minor_units,
            i64::MAX
        );
        assert_eq!(
            Money::new(500, Currency::USD).in_currency(Currency::IQD),
            Money::new(500, Currency::IQD)
        );
    }

    #[test]
    fn test_money_saturating_mul() {
        let m = Money::new(1000, Currency::IQD);
        assert_eq!(m.saturating_mul(3).minor_units, 3000);
        assert_eq!(Money::new(i64::MAX, Currency::IQD).saturating_mul(2).minor_units, i64::MAX);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("IQD"), Some(Currency::IQD));
        assert_eq!(Currency::from_code("try"), Some(Currency::TRY));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
