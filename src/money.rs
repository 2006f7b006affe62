// Exact money arithmetic for prices and budgets.
//
// Every price in the game is quoted in millions with exactly one decimal
// place ($5.5M, $45.0M). Storing tenths of a million as an integer makes
// sums and differences exact, so a selection that lands at exactly zero
// remaining budget is accepted and never flips to a rejection through
// accumulated float error. Decimal is used only at the boundary: parsing,
// display, and serialization.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount {0} has more than one decimal place")]
    TooPrecise(Decimal),

    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// A price or budget amount, stored as tenths of a million.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount {
    tenths: i64,
}

impl Amount {
    pub const ZERO: Amount = Amount { tenths: 0 };

    /// Build from a raw count of tenths ($5.5M == 55 tenths).
    pub fn from_tenths(tenths: i64) -> Self {
        Amount { tenths }
    }

    /// Build from whole millions ($45M == 450 tenths).
    pub fn from_major(major: i64) -> Self {
        Amount { tenths: major * 10 }
    }

    pub fn tenths(self) -> i64 {
        self.tenths
    }

    pub fn is_negative(self) -> bool {
        self.tenths < 0
    }

    /// The value as a Decimal with one fractional digit ("45.0", "5.5").
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.tenths, 1)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let tenths = value * Decimal::from(10);
        if tenths.fract() != Decimal::ZERO {
            return Err(AmountError::TooPrecise(value));
        }
        let tenths = tenths.to_i64().ok_or(AmountError::OutOfRange(value))?;
        Ok(Amount { tenths })
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.to_decimal()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount {
            tenths: self.tenths + rhs.tenths,
        }
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount {
            tenths: self.tenths - rhs.tenths,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}
