use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use rug::ops::Pow;
use rug::Float;

use crate::error::{NumericError, Result};
use crate::int::Int;
use crate::rounding::RoundingMode;
use crate::session::Session;

/// A decimal in one of the two representations the engine supports.
///
/// Fixed operands stay fixed and report [`NumericError::Overflow`] (or
/// [`NumericError::Underflow`] for vanishing quotients) when the result
/// leaves the representable range; anything involving a [`Dec::Big`] operand
/// produces a big result at the session precision.
#[derive(Debug, Clone)]
pub enum Dec {
    Double(f64),
    Big(Float),
}

impl Dec {
    pub fn new(value: f64, session: &Session) -> Dec {
        if session.arbitrary {
            Dec::Big(Float::with_val(session.float_prec(), value))
        } else {
            Dec::Double(value)
        }
    }

    pub fn parse(text: &str, session: &Session) -> Result<Dec> {
        if session.arbitrary {
            let incomplete = Float::parse(text)
                .map_err(|_| NumericError::Conversion(text.to_string()))?;
            Ok(Dec::Big(Float::with_val(session.float_prec(), incomplete)))
        } else {
            let parsed = text
                .parse::<f64>()
                .map_err(|_| NumericError::Conversion(text.to_string()))?;
            Ok(Dec::Double(parsed))
        }
    }

    /// Conversion that keeps the representation aligned with the source
    /// integer: fixed integers become doubles, big integers become big
    /// decimals.
    pub fn from_int(value: &Int, session: &Session) -> Dec {
        match value {
            Int::Small(v) => Dec::Double(*v as f64),
            Int::Big(v) => Dec::Big(Float::with_val(session.float_prec(), v)),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Dec::Double(v) => *v == 0.0,
            Dec::Big(v) => v.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Dec::Double(v) => *v < 0.0,
            Dec::Big(v) => v.is_sign_negative() && !v.is_zero(),
        }
    }

    pub fn is_integral(&self) -> bool {
        match self {
            Dec::Double(v) => v.fract() == 0.0,
            Dec::Big(v) => v.is_integer(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Dec::Double(v) => *v,
            Dec::Big(v) => v.to_f64(),
        }
    }

    fn widen(&self, session: &Session) -> Float {
        match self {
            Dec::Double(v) => Float::with_val(session.float_prec(), *v),
            Dec::Big(v) => v.clone(),
        }
    }

    fn check_double(value: f64) -> Result<Dec> {
        if value.is_finite() {
            Ok(Dec::Double(value))
        } else {
            Err(NumericError::Overflow)
        }
    }

    pub fn neg(&self) -> Dec {
        match self {
            Dec::Double(v) => Dec::Double(-v),
            Dec::Big(v) => Dec::Big(Float::with_val(v.prec(), -v)),
        }
    }

    pub fn abs(&self) -> Dec {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    pub fn add(&self, other: &Dec, session: &Session) -> Result<Dec> {
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => Self::check_double(a + b),
            _ => {
                let (a, b) = (self.widen(session), other.widen(session));
                Ok(Dec::Big(Float::with_val(session.float_prec(), &a + &b)))
            }
        }
    }

    pub fn sub(&self, other: &Dec, session: &Session) -> Result<Dec> {
        self.add(&other.neg(), session)
    }

    pub fn mul(&self, other: &Dec, session: &Session) -> Result<Dec> {
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => Self::check_double(a * b),
            _ => {
                let (a, b) = (self.widen(session), other.widen(session));
                Ok(Dec::Big(Float::with_val(session.float_prec(), &a * &b)))
            }
        }
    }

    pub fn div(&self, other: &Dec, session: &Session) -> Result<Dec> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => {
                let quotient = a / b;
                if !quotient.is_finite() {
                    Err(NumericError::Overflow)
                } else if quotient == 0.0 && *a != 0.0 {
                    Err(NumericError::Underflow)
                } else {
                    Ok(Dec::Double(quotient))
                }
            }
            _ => {
                let (a, b) = (self.widen(session), other.widen(session));
                Ok(Dec::Big(Float::with_val(session.float_prec(), &a / &b)))
            }
        }
    }

    pub fn pow(&self, other: &Dec, session: &Session) -> Result<Dec> {
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => Self::check_double(a.powf(*b)),
            _ => {
                let (a, b) = (self.widen(session), other.widen(session));
                Ok(Dec::Big(Float::with_val(session.float_prec(), (&a).pow(&b))))
            }
        }
    }

    pub fn cmp_dec(&self, other: &Dec) -> Option<Ordering> {
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => a.partial_cmp(b),
            (Dec::Double(a), Dec::Big(b)) => b.partial_cmp(a).map(Ordering::reverse),
            (Dec::Big(a), Dec::Double(b)) => a.partial_cmp(b),
            (Dec::Big(a), Dec::Big(b)) => a.partial_cmp(b),
        }
    }

    /// Applies a unary function in whichever representation the value
    /// carries. The callers guarantee the function is total on the value.
    pub fn map(
        &self,
        double: impl FnOnce(f64) -> f64,
        big: impl FnOnce(Float) -> Float,
    ) -> Dec {
        match self {
            Dec::Double(v) => Dec::Double(double(*v)),
            Dec::Big(v) => Dec::Big(big(v.clone())),
        }
    }

    pub fn sqrt(&self, _session: &Session) -> Dec {
        self.map(f64::sqrt, Float::sqrt)
    }

    /// Four-quadrant arctangent of `self / other`.
    pub fn atan2(&self, other: &Dec, session: &Session) -> Result<Dec> {
        if self.is_zero() && other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match (self, other) {
            (Dec::Double(a), Dec::Double(b)) => Ok(Dec::Double(a.atan2(*b))),
            _ => {
                let (a, b) = (self.widen(session), other.widen(session));
                Ok(Dec::Big(a.atan2(&b)))
            }
        }
    }

    /// Multiplies by ten to the `places` power.
    pub fn shift_decimal(&self, places: i64, session: &Session) -> Result<Dec> {
        let exponent = i32::try_from(places).map_err(|_| NumericError::Overflow)?;
        match self {
            Dec::Double(v) => Self::check_double(v * 10f64.powi(exponent)),
            Dec::Big(v) => {
                let scale = Float::with_val(session.float_prec(), 10u32).pow(exponent);
                Ok(Dec::Big(Float::with_val(session.float_prec(), v * &scale)))
            }
        }
    }

    /// Rounds to an integral decimal value per `mode`.
    ///
    /// [`RoundingMode::Euclidean`] acts as floor here, matching its
    /// behavior when dividing by a positive unit.
    pub fn round_to_integral(&self, mode: RoundingMode, session: &Session) -> Dec {
        match self {
            Dec::Double(v) => Dec::Double(round_f64(*v, mode)),
            Dec::Big(v) => Dec::Big(round_float(v.clone(), mode, session)),
        }
    }

    /// Exact conversion to an integer; `None` when the value has a
    /// fractional part or does not fit the fixed representation.
    pub fn to_int_exact(&self) -> Option<Int> {
        if !self.is_integral() {
            return None;
        }
        match self {
            Dec::Double(v) => {
                if *v >= i64::MIN as f64 && *v <= i64::MAX as f64 {
                    Some(Int::Small(*v as i64))
                } else {
                    None
                }
            }
            Dec::Big(v) => v.to_integer().map(Int::Big),
        }
    }
}

fn round_f64(value: f64, mode: RoundingMode) -> f64 {
    let truncated = value.trunc();
    let frac = (value - truncated).abs();
    let away = if value < 0.0 {
        truncated - 1.0
    } else {
        truncated + 1.0
    };
    match mode {
        RoundingMode::TowardZero => truncated,
        RoundingMode::AwayFromZero => {
            if frac > 0.0 {
                away
            } else {
                truncated
            }
        }
        RoundingMode::Ceiling => value.ceil(),
        RoundingMode::Floor | RoundingMode::Euclidean => value.floor(),
        RoundingMode::HalfAwayFromZero => value.round(),
        RoundingMode::HalfTowardZero => {
            if frac > 0.5 {
                away
            } else {
                truncated
            }
        }
        RoundingMode::HalfEven => value.round_ties_even(),
        RoundingMode::HalfCeiling => (value + 0.5).floor(),
        RoundingMode::HalfFloor => (value - 0.5).ceil(),
    }
}

fn round_float(value: Float, mode: RoundingMode, session: &Session) -> Float {
    let prec = session.float_prec();
    match mode {
        RoundingMode::TowardZero => value.trunc(),
        RoundingMode::AwayFromZero => {
            if value.is_integer() {
                value
            } else if value.is_sign_negative() {
                value.floor()
            } else {
                value.ceil()
            }
        }
        RoundingMode::Ceiling => value.ceil(),
        RoundingMode::Floor | RoundingMode::Euclidean => value.floor(),
        RoundingMode::HalfAwayFromZero => value.round(),
        RoundingMode::HalfTowardZero => {
            let truncated = value.clone().trunc();
            let frac = Float::with_val(prec, &value - &truncated).abs();
            if frac > 0.5 {
                if value.is_sign_negative() {
                    truncated - 1u32
                } else {
                    truncated + 1u32
                }
            } else {
                truncated
            }
        }
        RoundingMode::HalfEven => value.round_even(),
        RoundingMode::HalfCeiling => Float::with_val(prec, &value + 0.5f64).floor(),
        RoundingMode::HalfFloor => Float::with_val(prec, &value - 0.5f64).ceil(),
    }
}

impl PartialEq for Dec {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_dec(other) == Some(Ordering::Equal)
    }
}

impl Display for Dec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dec::Double(v) => write!(f, "{}", v),
            Dec::Big(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed() -> Session {
        Session {
            arbitrary: false,
            ..Session::default()
        }
    }

    #[test]
    fn fixed_overflow_and_underflow() {
        let s = fixed();
        let huge = Dec::Double(f64::MAX);
        assert_eq!(huge.add(&huge, &s), Err(NumericError::Overflow));
        assert_eq!(huge.mul(&huge, &s), Err(NumericError::Overflow));
        let tiny = Dec::Double(f64::MIN_POSITIVE);
        assert_eq!(tiny.div(&huge, &s), Err(NumericError::Underflow));
        assert_eq!(
            Dec::Double(1.0).div(&Dec::Double(0.0), &s),
            Err(NumericError::DivisionByZero),
        );
    }

    #[test]
    fn mixed_representations_widen() {
        let s = Session::default();
        let a = Dec::Double(0.5);
        let b = Dec::Big(Float::with_val(s.float_prec(), 0.25));
        let sum = a.add(&b, &s).unwrap();
        assert!(matches!(sum, Dec::Big(_)));
        assert_eq!(sum.to_f64(), 0.75);
    }

    #[test]
    fn rounding_to_integral() {
        let s = fixed();
        let cases = [
            (2.5, RoundingMode::HalfEven, 2.0),
            (3.5, RoundingMode::HalfEven, 4.0),
            (2.5, RoundingMode::HalfAwayFromZero, 3.0),
            (-2.5, RoundingMode::HalfAwayFromZero, -3.0),
            (2.5, RoundingMode::HalfTowardZero, 2.0),
            (2.5, RoundingMode::HalfCeiling, 3.0),
            (-2.5, RoundingMode::HalfCeiling, -2.0),
            (2.5, RoundingMode::HalfFloor, 2.0),
            (-2.5, RoundingMode::HalfFloor, -3.0),
            (-2.1, RoundingMode::Euclidean, -3.0),
            (-2.1, RoundingMode::AwayFromZero, -3.0),
            (-2.9, RoundingMode::TowardZero, -2.0),
        ];
        for (value, mode, expected) in cases {
            let got = Dec::Double(value).round_to_integral(mode, &s);
            assert_eq!(got.to_f64(), expected, "{value} with {mode:?}");
        }
    }

    #[test]
    fn big_rounding_matches_fixed() {
        let s = Session::default();
        for value in [2.5f64, 3.5, -2.5, -3.5, 2.4, -2.6] {
            for mode in [
                RoundingMode::Floor,
                RoundingMode::Ceiling,
                RoundingMode::HalfEven,
                RoundingMode::HalfAwayFromZero,
                RoundingMode::HalfTowardZero,
                RoundingMode::HalfCeiling,
                RoundingMode::HalfFloor,
            ] {
                let big = Dec::Big(Float::with_val(s.float_prec(), value));
                let got = big.round_to_integral(mode, &s).to_f64();
                assert_eq!(got, round_f64(value, mode), "{value} with {mode:?}");
            }
        }
    }

    #[test]
    fn exact_integer_conversion() {
        assert_eq!(Dec::Double(42.0).to_int_exact(), Some(Int::Small(42)));
        assert_eq!(Dec::Double(42.5).to_int_exact(), None);
    }
}
