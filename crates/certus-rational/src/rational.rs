//! Exact rational numbers.
//!
//! This module provides the exact arithmetic the equation builders and the
//! linear-system validator run on. Rationals are always stored in lowest
//! terms with a positive denominator.
//!
//! Decimal values (the "one decimal place" policy of the generator) are
//! ordinary rationals constructed from a scaled integer, so decimal mode
//! stays exact end to end.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::Integer;

/// An exact rational number.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let num = if denominator.is_negative() {
            -numerator.into_inner()
        } else {
            numerator.into_inner()
        };
        Self(RBig::from_parts(num, denominator.into_inner().unsigned_abs()))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Creates a rational from a decimal written as a scaled integer:
    /// `value / 10^digits`.
    ///
    /// `from_scaled(25, 1)` is 2.5; `from_scaled(25, 0)` is 25.
    #[must_use]
    pub fn from_scaled(value: i64, digits: u32) -> Self {
        Self::from_i64(value, 10i64.pow(digits))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Converts to an i64 if the value is an integer fitting in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer().and_then(|n| n.to_i64())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Renders the value as an exact decimal string, if one exists.
    ///
    /// Integers render without a decimal point (`"3"`); values whose
    /// denominator divides a power of ten render with exactly the digits
    /// required (`"2.5"`, `"-0.25"`). Returns `None` when the value has no
    /// finite decimal expansion (e.g. 1/3).
    #[must_use]
    pub fn to_decimal_string(&self) -> Option<String> {
        if self.is_integer() {
            return Some(self.numerator().to_string());
        }
        let ten = Self::from(10);
        let mut scaled = self.clone();
        for digits in 1..=12usize {
            scaled = scaled * ten.clone();
            if scaled.is_integer() {
                let n = scaled.numerator();
                let sign = if n.is_negative() { "-" } else { "" };
                let mut body = n.abs().to_string();
                if body.len() <= digits {
                    body = format!("{}{body}", "0".repeat(digits + 1 - body.len()));
                }
                let split = body.len() - digits;
                return Some(format!("{sign}{}.{}", &body[..split], &body[split..]));
            }
        }
        None
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Rational> for Rational {
    type Output = Self;

    fn div(self, rhs: &Rational) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);

        let sum = a.clone() + b.clone();
        assert_eq!(sum, Rational::from_i64(5, 6));

        let prod = a * b;
        assert_eq!(prod, Rational::from_i64(1, 6));
    }

    #[test]
    fn test_reduction() {
        let r = Rational::from_i64(4, 6);
        assert_eq!(r.numerator().to_i64(), Some(2));
        assert_eq!(r.denominator().to_i64(), Some(3));
    }

    #[test]
    fn test_negative_denominator() {
        let r = Rational::from_i64(1, -2);
        assert!(r.is_negative());
        assert_eq!(r, Rational::from_i64(-1, 2));
    }

    #[test]
    fn test_from_scaled() {
        assert_eq!(Rational::from_scaled(25, 1), Rational::from_i64(5, 2));
        assert_eq!(Rational::from_scaled(30, 1), Rational::from(3));
        assert_eq!(Rational::from_scaled(7, 0), Rational::from(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(2, 3).to_string(), "2/3");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Rational::from(3).to_decimal_string().as_deref(), Some("3"));
        assert_eq!(
            Rational::from_scaled(25, 1).to_decimal_string().as_deref(),
            Some("2.5")
        );
        assert_eq!(
            Rational::from_i64(-1, 4).to_decimal_string().as_deref(),
            Some("-0.25")
        );
        assert_eq!(Rational::from_i64(1, 3).to_decimal_string(), None);
    }
}
