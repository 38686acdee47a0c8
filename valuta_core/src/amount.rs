//! Free-text amount parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest accepted amount (`2^31 - 1`).
pub const MAX_AMOUNT: f64 = 2_147_483_647.0;

/// A validated conversion amount: positive, finite and at most [`MAX_AMOUNT`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("amount must be a finite number")]
    NotFinite,

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount must not exceed 2147483647")]
    TooLarge,
}

impl Amount {
    /// Parse user input, accepting either `.` or `,` as the decimal separator.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let normalized = input.trim().replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| AmountError::NotANumber(input.to_string()))?;
        Self::try_from(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        if value > MAX_AMOUNT {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(value))
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_dot_and_comma() {
        assert_eq!(Amount::parse("12.5").map(Amount::value), Ok(12.5));
        assert_eq!(Amount::parse("12,5").map(Amount::value), Ok(12.5));
        assert_eq!(Amount::parse("  100 ").map(Amount::value), Ok(100.0));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(
            Amount::parse("abc"),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(Amount::parse(""), Err(AmountError::NotANumber(_))));
        assert!(matches!(
            Amount::parse("1,000.50"),
            Err(AmountError::NotANumber(_))
        ));
        assert_eq!(Amount::parse("0"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse("-3"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse("NaN"), Err(AmountError::NotFinite));
        assert_eq!(Amount::parse("inf"), Err(AmountError::NotFinite));
        assert_eq!(Amount::parse("2147483648"), Err(AmountError::TooLarge));
    }

    #[test]
    fn upper_bound_is_inclusive() {
        assert_eq!(
            Amount::parse("2147483647").map(Amount::value),
            Ok(MAX_AMOUNT)
        );
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::parse("7").map(|a| a.to_string()), Ok("7.00".into()));
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Amount>("100").is_ok());
        assert!(serde_json::from_str::<Amount>("-1").is_err());
    }

    proptest! {
        #[test]
        fn valid_amounts_round_trip_exactly(value in 1e-6f64..=MAX_AMOUNT) {
            let text = value.to_string();
            prop_assert_eq!(Amount::parse(&text).map(Amount::value), Ok(value));
            let with_comma = text.replace('.', ",");
            prop_assert_eq!(Amount::parse(&with_comma).map(Amount::value), Ok(value));
        }

        #[test]
        fn non_positive_amounts_are_rejected(value in -1e12f64..=0.0) {
            prop_assert!(Amount::parse(&value.to_string()).is_err());
        }

        #[test]
        fn oversized_amounts_are_rejected(value in (MAX_AMOUNT + 1.0)..1e300f64) {
            prop_assert_eq!(Amount::parse(&value.to_string()), Err(AmountError::TooLarge));
        }

        #[test]
        fn garbage_is_rejected(text in "[a-zA-Z!?@# ]{0,12}") {
            // "inf"/"nan" spellings are letters too; both are rejected either way.
            prop_assert!(Amount::parse(&text).is_err());
        }
    }
}
