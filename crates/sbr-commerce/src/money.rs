//! Money type for representing monetary values.
//!
//! Uses integer minor units (centimes, cents, satoshis) to avoid
//! floating-point precision issues in monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    CHF,
    EUR,
    USD,
    BTC,
}

impl Currency {
    /// Get the currency code (e.g., "CHF").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CHF => "CHF",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::BTC => "BTC",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::BTC => 8,
            _ => 2,
        }
    }

    /// Minor units per whole unit (100 for CHF, 100_000_000 for BTC).
    pub fn minor_per_unit(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "CHF" => Some(Currency::CHF),
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "BTC" => Some(Currency::BTC),
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
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

    /// Create a Money value from whole units (e.g., 450 CHF).
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_unit()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Parse a non-negative decimal string such as `"2.50"` or `"0.1"`.
    ///
    /// ```
    /// use sbr_commerce::money::{Money, Currency};
    /// let price = Money::parse("2.5", Currency::CHF).unwrap();
    /// assert_eq!(price.minor_units, 250);
    /// ```
    pub fn parse(input: &str, currency: Currency) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::InvalidAmount(input.to_string());
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };
        let places = currency.decimal_places() as usize;
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty())
            || frac.len() > places
            || !all_digits(whole)
            || !all_digits(frac)
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = places);
            padded.parse().map_err(|_| invalid())?
        };

        whole
            .checked_mul(currency.minor_per_unit())
            .and_then(|m| m.checked_add(frac))
            .map(|minor| Self::new(minor, currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Convert a decimal amount such as `2.5`, rounding to the nearest minor unit.
    pub fn from_decimal(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidAmount(amount.to_string()));
        }
        let minor = (amount * currency.minor_per_unit() as f64).round();
        if minor >= i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self::new(minor as i64, currency))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Convert to a decimal value. For display math only.
    pub fn to_decimal(&self) -> f64 {
        self.minor_units as f64 / self.currency.minor_per_unit() as f64
    }

    /// Format as a display string (e.g., "CHF 49.99").
    pub fn display(&self) -> String {
        format!("{} {}", self.currency.code(), self.display_amount())
    }

    /// Format without currency code, using every decimal place (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let per_unit = self.currency.minor_per_unit();
        let places = self.currency.decimal_places() as usize;
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let whole = abs / per_unit as u64;
        let frac = abs % per_unit as u64;
        if places == 0 {
            return format!("{}{}", sign, whole);
        }
        format!("{}{}.{:0places$}", sign, whole, frac)
    }

    /// Format with trailing fractional zeros removed (e.g., "0.5" for 0.50000000 BTC).
    pub fn display_trimmed(&self) -> String {
        let full = self.display_amount();
        if !full.contains('.') {
            return full;
        }
        full.trim_end_matches('0').trim_end_matches('.').to_string()
    }

    /// Try to add another Money value, returning None if currencies don't match
    /// or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|m| Money::new(m, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_sub(other.minor_units)
            .map(|m| Money::new(m, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.minor_units
            .checked_mul(factor)
            .map(|m| Money::new(m, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
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
        let m = Money::new(4999, Currency::CHF);
        assert_eq!(m.minor_units, 4999);
        assert_eq!(m.currency, Currency::CHF);
    }

    #[test]
    fn test_money_from_major() {
        assert_eq!(Money::from_major(450, Currency::CHF).minor_units, 45_000);
        assert_eq!(Money::from_major(1, Currency::BTC).minor_units, 100_000_000);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse("2.50", Currency::CHF).unwrap().minor_units, 250);
        assert_eq!(Money::parse("2.5", Currency::CHF).unwrap().minor_units, 250);
        assert_eq!(Money::parse("1200", Currency::CHF).unwrap().minor_units, 120_000);
        assert_eq!(Money::parse(".5", Currency::CHF).unwrap().minor_units, 50);
        assert_eq!(Money::parse(" 0.1 ", Currency::BTC).unwrap().minor_units, 10_000_000);
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!(Money::parse("", Currency::CHF).is_err());
        assert!(Money::parse(".", Currency::CHF).is_err());
        assert!(Money::parse("-1", Currency::CHF).is_err());
        assert!(Money::parse("1.234", Currency::CHF).is_err());
        assert!(Money::parse("abc", Currency::BTC).is_err());
        assert!(Money::parse("1.2.3", Currency::BTC).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::CHF).display(), "CHF 49.99");
        assert_eq!(Money::new(750, Currency::CHF).display_amount(), "7.50");
        assert_eq!(Money::new(5, Currency::CHF).display_amount(), "0.05");
        assert_eq!(Money::new(-250, Currency::CHF).display_amount(), "-2.50");
    }

    #[test]
    fn test_money_display_trimmed() {
        assert_eq!(Money::new(50_000_000, Currency::BTC).display_trimmed(), "0.5");
        assert_eq!(Money::new(100_000_000, Currency::BTC).display_trimmed(), "1");
        assert_eq!(Money::new(25_000_000, Currency::BTC).display_trimmed(), "0.25");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::CHF);
        let b = Money::new(500, Currency::CHF);
        assert_eq!(a.try_add(&b).unwrap().minor_units, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let chf = Money::new(1000, Currency::CHF);
        let btc = Money::new(1000, Currency::BTC);
        assert!(chf.try_add(&btc).is_none());
        assert!(chf.try_subtract(&btc).is_none());
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::CHF);
        assert!(m.try_multiply(2).is_none());
        assert!(m.try_add(&Money::new(1, Currency::CHF)).is_none());
    }

    #[test]
    fn test_money_sum() {
        let values = [
            Money::new(45_000, Currency::CHF),
            Money::new(120_000, Currency::CHF),
        ];
        let total = Money::try_sum(values.iter(), Currency::CHF).unwrap();
        assert_eq!(total.minor_units, 165_000);
    }

    #[test]
    fn test_money_sum_mismatch() {
        let values = [Money::new(100, Currency::CHF), Money::new(100, Currency::EUR)];
        assert!(Money::try_sum(values.iter(), Currency::CHF).is_none());
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::BTC),
            Some(Money::zero(Currency::BTC))
        );
    }

    #[test]
    fn test_money_ordering() {
        let mut prices = vec![
            Money::new(120_000, Currency::CHF),
            Money::new(250, Currency::CHF),
            Money::new(45_000, Currency::CHF),
        ];
        prices.sort();
        assert_eq!(prices[0].minor_units, 250);
        assert_eq!(prices.iter().max().unwrap().minor_units, 120_000);
        assert!(Currency::CHF < Currency::BTC);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(2.5, Currency::CHF).unwrap().minor_units, 250);
        assert_eq!(Money::from_decimal(0.29, Currency::CHF).unwrap().minor_units, 29);
        assert_eq!(Money::from_decimal(0.1, Currency::BTC).unwrap().minor_units, 10_000_000);
        assert!(Money::from_decimal(-1.0, Currency::CHF).is_err());
        assert!(Money::from_decimal(f64::NAN, Currency::CHF).is_err());
        assert!(Money::from_decimal(1e30, Currency::CHF).is_err());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("CHF"), Some(Currency::CHF));
        assert_eq!(Currency::from_code("btc"), Some(Currency::BTC));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
