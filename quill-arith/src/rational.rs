use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::dec::Dec;
use crate::error::Result;
use crate::int::Int;
use crate::number::Real;
use crate::session::Session;

/// An exact fraction of two integers.
///
/// Invariants, upheld by [`Real::from_ratio`] (the only way to build one):
/// the denominator is positive, numerator and denominator are coprime, and
/// the denominator is never one (such a value is an [`Int`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rat {
    pub(crate) num: Int,
    pub(crate) den: Int,
}

impl Rat {
    pub fn num(&self) -> &Int {
        &self.num
    }

    pub fn den(&self) -> &Int {
        &self.den
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    pub fn neg(&self) -> Result<Rat> {
        // negating the numerator cannot break any invariant
        Ok(Rat {
            num: self.num.neg()?,
            den: self.den.clone(),
        })
    }

    pub fn abs(&self) -> Result<Rat> {
        if self.is_negative() {
            self.neg()
        } else {
            Ok(self.clone())
        }
    }

    pub fn recip(&self) -> Result<Real> {
        Real::from_ratio(self.den.clone(), self.num.clone())
    }

    pub fn to_dec(&self, session: &Session) -> Result<Dec> {
        Dec::from_int(&self.num, session).div(&Dec::from_int(&self.den, session), session)
    }

    pub fn add(&self, other: &Rat) -> Result<Real> {
        let num = self
            .num
            .mul(&other.den)?
            .add(&other.num.mul(&self.den)?)?;
        Real::from_ratio(num, self.den.mul(&other.den)?)
    }

    pub fn mul(&self, other: &Rat) -> Result<Real> {
        Real::from_ratio(self.num.mul(&other.num)?, self.den.mul(&other.den)?)
    }

    pub fn div(&self, other: &Rat) -> Result<Real> {
        Real::from_ratio(self.num.mul(&other.den)?, self.den.mul(&other.num)?)
    }

    /// Raises to a non-negative integer power.
    pub fn pow(&self, exponent: u32) -> Result<Real> {
        Real::from_ratio(self.num.pow(exponent)?, self.den.pow(exponent)?)
    }

    pub fn cmp_rat(&self, other: &Rat) -> Result<Ordering> {
        // cross-multiplication; both denominators are positive
        let left = self.num.mul(&other.den)?;
        let right = other.num.mul(&self.den)?;
        Ok(left.cmp_int(&right))
    }
}

impl Display for Rat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericError;
    use pretty_assertions::assert_eq;

    fn rat(num: i64, den: i64) -> Rat {
        match Real::from_ratio(Int::Small(num), Int::Small(den)).unwrap() {
            Real::Rational(r) => r,
            other => panic!("expected a rational, got {other:?}"),
        }
    }

    #[test]
    fn construction_normalizes() {
        assert_eq!(rat(6, 4), rat(3, 2));
        assert_eq!(rat(3, -4), rat(-3, 4));
        assert_eq!(
            Real::from_ratio(Int::Small(10), Int::Small(5)).unwrap(),
            Real::Integer(Int::Small(2)),
        );
        assert_eq!(
            Real::from_ratio(Int::Small(1), Int::Small(0)),
            Err(NumericError::DivisionByZero),
        );
    }

    #[test]
    fn arithmetic_stays_normalized() {
        // 1/2 + 1/2 collapses to the integer one
        assert_eq!(
            rat(1, 2).add(&rat(1, 2)).unwrap(),
            Real::Integer(Int::Small(1)),
        );
        assert_eq!(
            rat(2, 3).mul(&rat(3, 2)).unwrap(),
            Real::Integer(Int::Small(1)),
        );
        assert_eq!(
            rat(1, 2).div(&rat(3, 2)).unwrap(),
            Real::Rational(rat(1, 3)),
        );
    }

    #[test]
    fn reciprocal_moves_the_sign() {
        assert_eq!(rat(-3, 4).recip().unwrap(), Real::Rational(rat(-4, 3)));
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        assert_eq!(rat(1, 3).cmp_rat(&rat(1, 2)).unwrap(), Ordering::Less);
        assert_eq!(rat(-1, 2).cmp_rat(&rat(-1, 3)).unwrap(), Ordering::Less);
        assert_eq!(rat(2, 4).cmp_rat(&rat(1, 2)).unwrap(), Ordering::Equal);
    }
}
