use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use rug::ops::Pow;
use rug::Integer;

use crate::error::{NumericError, Result};
use crate::rounding::RoundingMode;
use crate::session::Session;

/// An integer in one of the two representations the engine supports.
///
/// Operations between two [`Int::Small`] values stay in the fixed
/// representation and report [`NumericError::Overflow`] when the result does
/// not fit; anything involving an [`Int::Big`] operand produces a big
/// result. The representation of new literals is chosen by
/// [`Session::arbitrary`].
#[derive(Debug, Clone)]
pub enum Int {
    Small(i64),
    Big(Integer),
}

impl Int {
    pub fn new(value: i64, session: &Session) -> Int {
        if session.arbitrary {
            Int::Big(Integer::from(value))
        } else {
            Int::Small(value)
        }
    }

    pub fn parse(text: &str, session: &Session) -> Result<Int> {
        if session.arbitrary {
            let parsed = Integer::from_str_radix(text, 10)
                .map_err(|_| NumericError::Conversion(text.to_string()))?;
            Ok(Int::Big(parsed))
        } else {
            let parsed = text
                .parse::<i64>()
                .map_err(|_| NumericError::Conversion(text.to_string()))?;
            Ok(Int::Small(parsed))
        }
    }

    pub fn zero(session: &Session) -> Int {
        Int::new(0, session)
    }

    pub fn one(session: &Session) -> Int {
        Int::new(1, session)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Int::Small(v) => *v == 0,
            Int::Big(v) => v.cmp0() == Ordering::Equal,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Int::Small(v) => *v == 1,
            Int::Big(v) => *v == 1,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Int::Small(v) => *v < 0,
            Int::Big(v) => v.cmp0() == Ordering::Less,
        }
    }

    pub fn is_even(&self) -> bool {
        match self {
            Int::Small(v) => v % 2 == 0,
            Int::Big(v) => v.is_even(),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Int::Small(v) => Some(*v),
            Int::Big(v) => v.to_i64(),
        }
    }

    pub fn to_u32(&self) -> Option<u32> {
        match self {
            Int::Small(v) => u32::try_from(*v).ok(),
            Int::Big(v) => v.to_u32(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Int::Small(v) => *v as f64,
            Int::Big(v) => v.to_f64(),
        }
    }

    pub fn to_integer(&self) -> Integer {
        match self {
            Int::Small(v) => Integer::from(*v),
            Int::Big(v) => v.clone(),
        }
    }

    pub fn neg(&self) -> Result<Int> {
        match self {
            Int::Small(v) => v
                .checked_neg()
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            Int::Big(v) => Ok(Int::Big(Integer::from(-v))),
        }
    }

    pub fn abs(&self) -> Result<Int> {
        if self.is_negative() {
            self.neg()
        } else {
            Ok(self.clone())
        }
    }

    pub fn add(&self, other: &Int) -> Result<Int> {
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => a
                .checked_add(*b)
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            _ => Ok(Int::Big(Integer::from(
                self.to_integer() + other.to_integer(),
            ))),
        }
    }

    pub fn sub(&self, other: &Int) -> Result<Int> {
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => a
                .checked_sub(*b)
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            _ => Ok(Int::Big(Integer::from(
                self.to_integer() - other.to_integer(),
            ))),
        }
    }

    pub fn mul(&self, other: &Int) -> Result<Int> {
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => a
                .checked_mul(*b)
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            _ => Ok(Int::Big(Integer::from(
                self.to_integer() * other.to_integer(),
            ))),
        }
    }

    pub fn pow(&self, exponent: u32) -> Result<Int> {
        match self {
            Int::Small(v) => v
                .checked_pow(exponent)
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            Int::Big(v) => Ok(Int::Big(Integer::from(v.pow(exponent)))),
        }
    }

    pub fn gcd(&self, other: &Int) -> Result<Int> {
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => {
                let mut a = a.unsigned_abs();
                let mut b = b.unsigned_abs();
                while b != 0 {
                    let r = a % b;
                    a = b;
                    b = r;
                }
                i64::try_from(a)
                    .map(Int::Small)
                    .map_err(|_| NumericError::Overflow)
            }
            _ => {
                let a = self.to_integer();
                Ok(Int::Big(Integer::from(a.gcd_ref(&other.to_integer()))))
            }
        }
    }

    /// Exact quotient, or `None` when `other` does not divide `self`.
    pub fn divide_exact(&self, other: &Int) -> Result<Option<Int>> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => {
                // checked_rem: i64::MIN % -1 overflows even though r = 0
                match a.checked_rem(*b) {
                    Some(0) => a
                        .checked_div(*b)
                        .map(|q| Some(Int::Small(q)))
                        .ok_or(NumericError::Overflow),
                    Some(_) => Ok(None),
                    None => Err(NumericError::Overflow),
                }
            }
            _ => {
                let (a, b) = (self.to_integer(), other.to_integer());
                if !a.is_divisible(&b) {
                    return Ok(None);
                }
                Ok(Some(Int::Big(a / b)))
            }
        }
    }

    /// Integer quotient of `self / other`, rounded per `mode`.
    ///
    /// Both operands are widened for the computation; the result is demoted
    /// back to the fixed representation when both inputs were fixed.
    pub fn div_round(&self, other: &Int, mode: RoundingMode) -> Result<Int> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let dividend = self.to_integer();
        let divisor = other.to_integer();
        let quotient = round_quotient(&dividend, &divisor, mode);
        match (self, other) {
            (Int::Small(_), Int::Small(_)) => quotient
                .to_i64()
                .map(Int::Small)
                .ok_or(NumericError::Overflow),
            _ => Ok(Int::Big(quotient)),
        }
    }

    pub fn is_perfect_square(&self) -> bool {
        !self.is_negative() && self.to_integer().is_perfect_square()
    }

    /// Exact square root of a perfect square.
    pub fn sqrt_exact(&self) -> Option<Int> {
        if !self.is_perfect_square() {
            return None;
        }
        let root = Integer::from(self.to_integer().sqrt_ref());
        match self {
            Int::Small(_) => root.to_i64().map(Int::Small),
            Int::Big(_) => Some(Int::Big(root)),
        }
    }

    pub fn cmp_int(&self, other: &Int) -> Ordering {
        match (self, other) {
            (Int::Small(a), Int::Small(b)) => a.cmp(b),
            (Int::Small(a), Int::Big(b)) => Integer::from(*a).cmp(b),
            (Int::Big(a), Int::Small(b)) => a.cmp(&Integer::from(*b)),
            (Int::Big(a), Int::Big(b)) => a.cmp(b),
        }
    }
}

/// Truncating quotient of `dividend / divisor`, then a correction step that
/// realizes the requested rounding mode by comparing twice the remainder
/// against the divisor.
fn round_quotient(dividend: &Integer, divisor: &Integer, mode: RoundingMode) -> Integer {
    let (quotient, remainder) =
        <(Integer, Integer)>::from(dividend.div_rem_ref(divisor));
    if remainder.cmp0() == Ordering::Equal {
        return quotient;
    }

    // +1 when the exact quotient is positive, -1 when negative
    let away: i32 = if (dividend.cmp0() == Ordering::Less) == (divisor.cmp0() == Ordering::Less) {
        1
    } else {
        -1
    };
    let twice_remainder = Integer::from(remainder.abs_ref()) << 1u32;
    let abs_divisor = Integer::from(divisor.abs_ref());

    let adjust = match mode {
        RoundingMode::TowardZero => 0,
        RoundingMode::AwayFromZero => away,
        RoundingMode::Ceiling => {
            if away > 0 {
                1
            } else {
                0
            }
        }
        RoundingMode::Floor => {
            if away < 0 {
                -1
            } else {
                0
            }
        }
        RoundingMode::HalfAwayFromZero => {
            if twice_remainder >= abs_divisor {
                away
            } else {
                0
            }
        }
        RoundingMode::HalfTowardZero => {
            if twice_remainder > abs_divisor {
                away
            } else {
                0
            }
        }
        RoundingMode::HalfEven => match twice_remainder.cmp(&abs_divisor) {
            Ordering::Greater => away,
            Ordering::Equal => {
                if quotient.is_even() {
                    0
                } else {
                    away
                }
            }
            Ordering::Less => 0,
        },
        RoundingMode::HalfCeiling => match twice_remainder.cmp(&abs_divisor) {
            Ordering::Greater => away,
            Ordering::Equal => {
                if away > 0 {
                    1
                } else {
                    0
                }
            }
            Ordering::Less => 0,
        },
        RoundingMode::HalfFloor => match twice_remainder.cmp(&abs_divisor) {
            Ordering::Greater => away,
            Ordering::Equal => {
                if away < 0 {
                    -1
                } else {
                    0
                }
            }
            Ordering::Less => 0,
        },
        // quotient chosen so that the remainder is non-negative
        RoundingMode::Euclidean => {
            if divisor.cmp0() == Ordering::Greater {
                if away < 0 {
                    -1
                } else {
                    0
                }
            } else if away > 0 {
                1
            } else {
                0
            }
        }
    };
    quotient + adjust
}

impl PartialEq for Int {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_int(other) == Ordering::Equal
    }
}

impl Eq for Int {}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_int(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_int(other)
    }
}

impl Display for Int {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Int::Small(v) => write!(f, "{}", v),
            Int::Big(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int::Small(value)
    }
}

impl From<Integer> for Int {
    fn from(value: Integer) -> Self {
        Int::Big(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small(v: i64) -> Int {
        Int::Small(v)
    }

    fn big(v: i64) -> Int {
        Int::Big(Integer::from(v))
    }

    #[test]
    fn fixed_overflow_is_reported() {
        assert_eq!(
            small(i64::MAX).add(&small(1)),
            Err(NumericError::Overflow),
        );
        assert_eq!(
            small(i64::MIN).neg(),
            Err(NumericError::Overflow),
        );
        assert_eq!(
            small(i64::MIN).divide_exact(&small(-1)),
            Err(NumericError::Overflow),
        );
        assert_eq!(
            small(i64::MIN).divide_exact(&small(2)).unwrap(),
            Some(small(i64::MIN / 2)),
        );
    }

    #[test]
    fn mixed_representations_widen() {
        let sum = small(2).add(&big(3)).unwrap();
        assert!(matches!(sum, Int::Big(_)));
        assert_eq!(sum, small(5));
    }

    #[test]
    fn exact_division() {
        assert_eq!(small(12).divide_exact(&small(4)).unwrap(), Some(small(3)));
        assert_eq!(small(12).divide_exact(&small(5)).unwrap(), None);
        assert_eq!(
            small(1).divide_exact(&small(0)),
            Err(NumericError::DivisionByZero),
        );
    }

    #[test]
    fn rounded_division_all_modes() {
        // 7 / 2 = 3.5 and -7 / 2 = -3.5 exercise every tie rule
        let cases = [
            (RoundingMode::AwayFromZero, 4, -4),
            (RoundingMode::TowardZero, 3, -3),
            (RoundingMode::Ceiling, 4, -3),
            (RoundingMode::Floor, 3, -4),
            (RoundingMode::HalfAwayFromZero, 4, -4),
            (RoundingMode::HalfTowardZero, 3, -3),
            (RoundingMode::HalfEven, 4, -4),
            (RoundingMode::HalfCeiling, 4, -3),
            (RoundingMode::HalfFloor, 3, -4),
            (RoundingMode::Euclidean, 3, -4),
        ];
        for (mode, pos, neg) in cases {
            assert_eq!(small(7).div_round(&small(2), mode).unwrap(), small(pos), "{mode:?}");
            assert_eq!(small(-7).div_round(&small(2), mode).unwrap(), small(neg), "{mode:?}");
        }
    }

    #[test]
    fn half_even_prefers_even_quotient() {
        let mode = RoundingMode::HalfEven;
        assert_eq!(small(5).div_round(&small(2), mode).unwrap(), small(2));
        assert_eq!(small(7).div_round(&small(2), mode).unwrap(), small(4));
    }

    #[test]
    fn euclidean_remainder_is_non_negative() {
        for dividend in [-9i64, -7, -1, 0, 1, 7, 9] {
            for divisor in [-4i64, -3, 3, 4] {
                let q = small(dividend)
                    .div_round(&small(divisor), RoundingMode::Euclidean)
                    .unwrap();
                let r = small(dividend).sub(&small(divisor).mul(&q).unwrap()).unwrap();
                assert!(!r.is_negative(), "{dividend} / {divisor} gave r = {r}");
                assert!(r.cmp_int(&small(divisor).abs().unwrap()) == Ordering::Less);
            }
        }
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(small(49).sqrt_exact(), Some(small(7)));
        assert_eq!(small(50).sqrt_exact(), None);
        assert_eq!(small(-4).sqrt_exact(), None);
        assert_eq!(big(144).sqrt_exact(), Some(big(12)));
    }

    #[test]
    fn gcd_is_non_negative() {
        assert_eq!(small(12).gcd(&small(-18)).unwrap(), small(6));
        assert_eq!(small(0).gcd(&small(5)).unwrap(), small(5));
        assert_eq!(big(12).gcd(&small(18)).unwrap(), small(6));
    }
}
