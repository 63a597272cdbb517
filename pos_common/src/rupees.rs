use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{op, Quantity};

pub const PKR_CURRENCY_CODE: &str = "PKR";

//--------------------------------------      Rupees       -----------------------------------------------------------
/// A Pakistani Rupee amount in minor units (paisa). All currency arithmetic in the POS is integer arithmetic over
/// this type; conversion to and from decimal representations only happens at the API boundary.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Rupees(i64);

op!(binary Rupees, Add, add);
op!(binary Rupees, Sub, sub);
op!(inplace Rupees, SubAssign, sub_assign);
op!(unary Rupees, Neg, neg);

impl Mul<i64> for Rupees {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Mul<Quantity> for Rupees {
    type Output = Self;

    /// A price times a fractional quantity, rounded to the nearest paisa (half away from zero).
    fn mul(self, rhs: Quantity) -> Self::Output {
        let raw = i128::from(self.0) * i128::from(rhs.value());
        let rounded = if raw >= 0 { (raw + 50) / 100 } else { (raw - 50) / 100 };
        #[allow(clippy::cast_possible_truncation)]
        Self(rounded as i64)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paisa: {0}")]
pub struct RupeesConversionError(String);

impl From<i64> for Rupees {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Rupees {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Rupees {}

impl TryFrom<f64> for Rupees {
    type Error = RupeesConversionError;

    /// Converts a decimal rupee amount (as the backend reports prices) into paisa, rounding to the nearest paisa.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(RupeesConversionError(format!("{value} is not a finite amount")));
        }
        let paisa = (value * 100.0).round();
        if paisa.abs() >= i64::MAX as f64 {
            return Err(RupeesConversionError(format!("Value {value} is too large to convert to Rupees")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paisa as i64))
    }
}

impl Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}Rs{}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Rupees {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// The amount as a decimal rupee value, for the JSON wire format only.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}
