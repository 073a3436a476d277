//! # Exact Rational Arithmetic
//!
//! Every share in a Faraidh distribution is a fraction of the net estate. Shares are
//! kept as reduced fractions over arbitrary-precision integers and only turned into
//! currency at the last moment with [`scale`], which truncates and never rounds. The
//! engine reconciles the truncation slack explicitly, so nothing here compensates for it.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::FaraidhError;

/// Greatest common divisor by Euclid's algorithm. The result is never negative.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple. `lcm(0, x) == 0`.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / gcd(a, b)
}

/// An ordered pair `(numerator, denominator)`.
///
/// Values built with [`Fraction::new`] or returned by any arithmetic are normalised:
/// the denominator is positive and the pair is in lowest terms, with `0/1` as the only
/// zero. [`Fraction::raw`] keeps caller input verbatim so that validation can inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Fraction {
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    num: BigInt,
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    den: BigInt,
}

impl Fraction {
    /// Builds a reduced fraction. Fails with `DivisionByZero` when `den == 0`.
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Self, FaraidhError> {
        Self::raw(num, den).reduce()
    }

    /// Keeps the pair exactly as given, without normalisation.
    pub fn raw(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Self { num: num.into(), den: den.into() }
    }

    pub fn zero() -> Self {
        Self { num: BigInt::zero(), den: BigInt::one() }
    }

    pub fn one() -> Self {
        Self { num: BigInt::one(), den: BigInt::one() }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// True when the (normalised) value is greater than one, i.e. the estate is over-subscribed.
    pub fn exceeds_one(&self) -> bool {
        self.num > self.den
    }

    /// Normalises sign onto the numerator and reduces to lowest terms.
    pub fn reduce(&self) -> Result<Self, FaraidhError> {
        if self.den.is_zero() {
            return Err(FaraidhError::DivisionByZero { operation: "reduce".to_string() });
        }
        if self.num.is_zero() {
            return Ok(Self::zero());
        }

        let g = gcd(&self.num, &self.den);
        let mut num = &self.num / &g;
        let mut den = &self.den / &g;
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        Ok(Self { num, den })
    }

    /// Sum over the common denominator `lcm(den1, den2)`.
    pub fn add(&self, other: &Fraction) -> Result<Self, FaraidhError> {
        if self.den.is_zero() || other.den.is_zero() {
            return Err(FaraidhError::DivisionByZero { operation: "add".to_string() });
        }
        let common = lcm(&self.den, &other.den);
        let lhs = &self.num * (&common / &self.den);
        let rhs = &other.num * (&common / &other.den);
        Self::raw(lhs + rhs, common).reduce()
    }

    pub fn sub(&self, other: &Fraction) -> Result<Self, FaraidhError> {
        self.add(&Self::raw(-other.num.clone(), other.den.clone()))
    }

    pub fn mul(&self, other: &Fraction) -> Result<Self, FaraidhError> {
        Self::raw(&self.num * &other.num, &self.den * &other.den).reduce()
    }

    /// Multiplies by a whole number, e.g. a per-head fraction by a head-count.
    pub fn mul_int(&self, factor: impl Into<BigInt>) -> Result<Self, FaraidhError> {
        Self::raw(&self.num * factor.into(), self.den.clone()).reduce()
    }

    pub fn div_int(&self, divisor: impl Into<BigInt>) -> Result<Self, FaraidhError> {
        Self::raw(self.num.clone(), &self.den * divisor.into()).reduce()
    }

    /// Sums a sequence of fractions, starting from `0/1`.
    pub fn sum<'a>(fractions: impl IntoIterator<Item = &'a Fraction>) -> Result<Self, FaraidhError> {
        fractions
            .into_iter()
            .try_fold(Self::zero(), |acc, f| acc.add(f))
    }

    /// Long division, digit by digit, stopping at `precision` places or when exact.
    pub fn to_decimal_string(&self, precision: usize) -> Result<String, FaraidhError> {
        let f = self.reduce()?;
        let negative = f.num.is_negative();
        let num = f.num.abs();
        let whole = &num / &f.den;
        let mut remainder = &num % &f.den;
        let sign = if negative { "-" } else { "" };

        if remainder.is_zero() {
            return Ok(format!("{}{}", sign, whole));
        }

        let ten = BigInt::from(10);
        let mut digits = String::new();
        for _ in 0..precision {
            if remainder.is_zero() {
                break;
            }
            remainder *= &ten;
            digits.push_str(&(&remainder / &f.den).to_string());
            remainder = &remainder % &f.den;
        }

        if digits.is_empty() {
            Ok(format!("{}{}", sign, whole))
        } else {
            Ok(format!("{}{}.{}", sign, whole, digits))
        }
    }

    /// Approximates the fraction as a `Decimal` (28 places of long division).
    pub fn to_decimal(&self) -> Result<Decimal, FaraidhError> {
        let text = self.to_decimal_string(28)?;
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| FaraidhError::Overflow { operation: format!("to_decimal({})", self) })
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// `floor(base * fraction)` for a non-negative base and a non-negative fraction.
///
/// Division truncates. Callers must account for the lost remainder themselves.
pub fn scale(base: &BigInt, fraction: &Fraction) -> Result<BigInt, FaraidhError> {
    if base.is_negative() {
        return Err(FaraidhError::NegativeBase {
            operation: "scale".to_string(),
            value: base.to_string(),
        });
    }
    if fraction.den.is_zero() {
        return Err(FaraidhError::DivisionByZero { operation: "scale".to_string() });
    }
    let f = fraction.reduce()?;
    Ok(base * &f.num / &f.den)
}

/// The asl al-masalah: the least common multiple of all denominators (`1` when empty).
pub fn common_denominator<'a>(fractions: impl IntoIterator<Item = &'a Fraction>) -> BigInt {
    fractions
        .into_iter()
        .fold(BigInt::one(), |asl, f| lcm(&asl, &f.den))
}

/// Expresses each fraction as whole siham (share units) of `asl`.
pub fn to_siham<'a>(fractions: impl IntoIterator<Item = &'a Fraction>, asl: &BigInt) -> Vec<BigInt> {
    fractions
        .into_iter()
        .map(|f| &f.num * (asl / &f.den))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(&big(12), &big(18)), big(6));
        assert_eq!(gcd(&big(-12), &big(18)), big(6));
        assert_eq!(gcd(&big(0), &big(7)), big(7));
        assert_eq!(lcm(&big(4), &big(6)), big(12));
        assert_eq!(lcm(&big(0), &big(6)), big(0));
    }

    #[test]
    fn test_reduce_normalises_sign_and_terms() {
        let f = Fraction::raw(6, -8).reduce().unwrap();
        assert_eq!(f, Fraction::raw(-3, 4));
        assert_eq!(Fraction::raw(0, -5).reduce().unwrap(), Fraction::zero());
        assert_eq!(
            Fraction::raw(1, 0).reduce(),
            Err(FaraidhError::DivisionByZero { operation: "reduce".to_string() })
        );
    }

    #[test]
    fn test_add_over_common_denominator() {
        let half = Fraction::new(1, 2).unwrap();
        let sixth = Fraction::new(1, 6).unwrap();
        let two_thirds = Fraction::new(2, 3).unwrap();
        let total = Fraction::sum([&half, &sixth, &two_thirds]).unwrap();
        assert_eq!(total, Fraction::raw(4, 3));
        assert!(total.exceeds_one());
    }

    #[test]
    fn test_scale_truncates() {
        let sixth = Fraction::new(1, 6).unwrap();
        assert_eq!(scale(&big(100_000_000), &sixth).unwrap(), big(16_666_666));
        assert_eq!(scale(&big(0), &sixth).unwrap(), big(0));

        let err = scale(&big(-1), &sixth).unwrap_err();
        assert!(matches!(err, FaraidhError::NegativeBase { .. }));
        assert!(scale(&big(10), &Fraction::raw(1, 0)).is_err());
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Fraction::new(1, 8).unwrap().to_decimal_string(6).unwrap(), "0.125");
        assert_eq!(Fraction::new(1, 3).unwrap().to_decimal_string(4).unwrap(), "0.3333");
        assert_eq!(Fraction::new(4, 2).unwrap().to_decimal_string(4).unwrap(), "2");
        assert_eq!(Fraction::new(-1, 4).unwrap().to_decimal_string(4).unwrap(), "-0.25");
        assert_eq!(Fraction::new(1, 3).unwrap().to_decimal_string(0).unwrap(), "0");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Fraction::new(1, 8).unwrap().to_decimal().unwrap(), dec!(0.125));
    }

    #[test]
    fn test_asl_masalah_and_siham() {
        let fractions = vec![
            Fraction::new(1, 2).unwrap(),
            Fraction::new(1, 6).unwrap(),
            Fraction::new(2, 3).unwrap(),
        ];
        let asl = common_denominator(&fractions);
        assert_eq!(asl, big(6));
        assert_eq!(to_siham(&fractions, &asl), vec![big(3), big(1), big(4)]);
        assert_eq!(common_denominator(&Vec::<Fraction>::new()), big(1));
    }
}
