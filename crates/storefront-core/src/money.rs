//! Money type for representing monetary values.
//!
//! Uses an integer minor-unit representation (paisa, cents) so that totals
//! add up exactly. Percentages are the only place rounding happens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    PKR,
    USD,
    EUR,
    GBP,
    INR,
    AED,
    SAR,
}

impl Currency {
    /// Get the currency code (e.g., "PKR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PKR => "PKR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
        }
    }

    /// Get the currency symbol (e.g., "Rs").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PKR => "Rs ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::AED => "AED ",
            Currency::SAR => "SAR ",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "PKR" => Some(Currency::PKR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "AED" => Some(Currency::AED),
            "SAR" => Some(Currency::SAR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_core::money::{Money, Currency};
    /// let price = Money::from_decimal(699.0, Currency::PKR);
    /// assert_eq!(price.amount_minor, 69900);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_minor = (amount * multiplier as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "Rs 699.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "699.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another Money value, failing on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Subtract another Money value, failing on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by an integer quantity.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Calculate a percentage of this amount, rounded to the minor unit.
    ///
    /// Rounds half away from zero.
    pub fn percentage(&self, percent: f64) -> Money {
        let scaled = self.amount_minor as f64 * percent / 100.0;
        Money::new(scaled.round() as i64, self.currency)
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
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
    fn test_money_from_minor() {
        let m = Money::new(69900, Currency::PKR);
        assert_eq!(m.amount_minor, 69900);
        assert_eq!(m.currency, Currency::PKR);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(1199.0, Currency::PKR);
        assert_eq!(m.amount_minor, 119900);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(69900, Currency::PKR).display(), "Rs 699.00");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::PKR);
        let b = Money::new(500, Currency::PKR);
        assert_eq!(a.try_add(&b).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(1000, Currency::PKR);
        let b = Money::new(300, Currency::PKR);
        assert_eq!(a.try_subtract(&b).unwrap().amount_minor, 700);
    }

    #[test]
    fn test_money_multiply_overflow() {
        let m = Money::new(i64::MAX / 2 + 1, Currency::PKR);
        assert!(matches!(m.try_multiply(2), Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(37000, Currency::PKR);
        assert_eq!(m.percentage(10.0).amount_minor, 3700);

        // 12.5% of 0.99 is 0.12375, rounds to 0.12
        let m = Money::new(99, Currency::PKR);
        assert_eq!(m.percentage(12.5).amount_minor, 12);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let pkr = Money::new(1000, Currency::PKR);
        let usd = Money::new(1000, Currency::USD);
        assert!(matches!(
            pkr.try_add(&usd),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_try_sum() {
        let values = [Money::new(100, Currency::PKR), Money::new(250, Currency::PKR)];
        let total = Money::try_sum(values.iter(), Currency::PKR).unwrap();
        assert_eq!(total.amount_minor, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("PKR"), Some(Currency::PKR));
        assert_eq!(Currency::from_code(" usd "), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
