//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in currency units (e.g. euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    #[default]
    Eur,
    /// US Dollar
    Usd,
    /// Pound Sterling
    Gbp,
    /// Swiss Franc
    Chf,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
            Self::Gbp => write!(f, "GBP"),
            Self::Chf => write!(f, "CHF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Eur);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Eur);
    }

    #[test]
    fn test_money_display_uses_two_decimals() {
        assert_eq!(Money::new(dec!(1500), Currency::Eur).to_string(), "1500.00 EUR");
        assert_eq!(Money::new(dec!(-12.5), Currency::Usd).to_string(), "-12.50 USD");
    }

    #[rstest]
    #[case("\"EUR\"", Currency::Eur)]
    #[case("\"USD\"", Currency::Usd)]
    #[case("\"GBP\"", Currency::Gbp)]
    #[case("\"CHF\"", Currency::Chf)]
    fn test_currency_serde_codes(#[case] json: &str, #[case] expected: Currency) {
        assert_eq!(serde_json::from_str::<Currency>(json).unwrap(), expected);
        assert_eq!(serde_json::to_string(&expected).unwrap(), json);
        assert_eq!(format!("\"{expected}\""), json);
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        assert!(serde_json::from_str::<Currency>("\"XXX\"").is_err());
        assert!(serde_json::from_str::<Currency>("\"eur\"").is_err());
    }

    #[test]
    fn test_currency_defaults_to_euro() {
        assert_eq!(Currency::default(), Currency::Eur);
    }
}
