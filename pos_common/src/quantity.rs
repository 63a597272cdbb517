use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

//--------------------------------------      Quantity       ---------------------------------------------------------
/// A stock or sale quantity in hundredths of a unit. Hardware stock is sold in fractional units (quarter kilograms
/// of nails, half lengths of pipe), so quantities carry two decimal places of fixed-point precision.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Quantity(i64);

op!(binary Quantity, Add, add);
op!(binary Quantity, Sub, sub);
op!(inplace Quantity, AddAssign, add_assign);
op!(inplace Quantity, SubAssign, sub_assign);
op!(unary Quantity, Neg, neg);

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a quantity: {0}")]
pub struct QuantityConversionError(String);

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Quantity {}

impl TryFrom<f64> for Quantity {
    type Error = QuantityConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(QuantityConversionError(format!("{value} is not a finite quantity")));
        }
        let hundredths = (value * 100.0).round();
        if hundredths.abs() >= i64::MAX as f64 {
            return Err(QuantityConversionError(format!("Quantity {value} is out of range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(hundredths as i64))
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}", self.0 / 100)
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            write!(f, "{sign}{}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
        }
    }
}

impl Quantity {
    pub const ONE: Quantity = Quantity(100);
    pub const ZERO: Quantity = Quantity(0);

    pub fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// The quantity in hundredths of a unit.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quarter_unit_increments() {
        let mut qty = Quantity::ONE;
        qty += Quantity::from_hundredths(25);
        assert_eq!(qty, Quantity::from_hundredths(125));
        qty -= Quantity::from_units(2);
        assert!(!qty.is_positive());
    }

    #[test]
    fn conversion_from_decimal() {
        assert_eq!(Quantity::try_from(0.25).unwrap(), Quantity::from_hundredths(25));
        assert_eq!(Quantity::try_from(3.0).unwrap(), Quantity::from_units(3));
        assert!(Quantity::try_from(f64::NAN).is_err());
    }

    #[test]
    fn display_trims_whole_units() {
        assert_eq!(Quantity::from_units(12).to_string(), "12");
        assert_eq!(Quantity::from_hundredths(1025).to_string(), "10.25");
        assert_eq!(Quantity::from_hundredths(-50).to_string(), "-0.50");
    }
}
