use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use rug::ops::Pow;
use rug::Integer;

use crate::dec::Dec;
use crate::error::{NumericError, Result};
use crate::int::Int;
use crate::rational::Rat;
use crate::rounding::RoundingMode;
use crate::session::Session;

/// A real value: one of the three non-complex kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Real {
    Integer(Int),
    Decimal(Dec),
    Rational(Rat),
}

impl Real {
    /// The only constructor of rational values. Normalizes sign and common
    /// factors, collapses a unit denominator to an integer, and rejects a
    /// zero denominator.
    pub fn from_ratio(num: Int, den: Int) -> Result<Real> {
        if den.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let (mut num, mut den) = (num, den);
        if den.is_negative() {
            num = num.neg()?;
            den = den.neg()?;
        }
        let g = num.gcd(&den)?;
        if !g.is_one() {
            // exact by construction of the gcd
            num = num.div_round(&g, RoundingMode::TowardZero)?;
            den = den.div_round(&g, RoundingMode::TowardZero)?;
        }
        if den.is_one() {
            Ok(Real::Integer(num))
        } else {
            Ok(Real::Rational(Rat { num, den }))
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Real::Integer(v) => v.is_zero(),
            Real::Decimal(v) => v.is_zero(),
            // a zero numerator would have normalized to an integer
            Real::Rational(_) => false,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Real::Integer(v) => v.is_negative(),
            Real::Decimal(v) => v.is_negative(),
            Real::Rational(v) => v.is_negative(),
        }
    }

    pub fn neg(&self) -> Result<Real> {
        Ok(match self {
            Real::Integer(v) => Real::Integer(v.neg()?),
            Real::Decimal(v) => Real::Decimal(v.neg()),
            Real::Rational(v) => Real::Rational(v.neg()?),
        })
    }

    pub fn to_dec(&self, session: &Session) -> Result<Dec> {
        Ok(match self {
            Real::Integer(v) => Dec::from_int(v, session),
            Real::Decimal(v) => v.clone(),
            Real::Rational(v) => v.to_dec(session)?,
        })
    }

    pub fn cmp_real(&self, other: &Real, session: &Session) -> Result<Ordering> {
        match (self, other) {
            (Real::Integer(a), Real::Integer(b)) => Ok(a.cmp_int(b)),
            (Real::Rational(a), Real::Rational(b)) => a.cmp_rat(b),
            (Real::Integer(a), Real::Rational(b)) => {
                Ok(a.mul(b.den())?.cmp_int(b.num()))
            }
            (Real::Rational(a), Real::Integer(b)) => {
                Ok(a.num().cmp_int(&b.mul(a.den())?))
            }
            _ => {
                let a = self.to_dec(session)?;
                let b = other.to_dec(session)?;
                a.cmp_dec(&b).ok_or(NumericError::Type {
                    op: "comparison",
                    kind: "decimal",
                })
            }
        }
    }
}

impl Display for Real {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Real::Integer(v) => write!(f, "{}", v),
            Real::Decimal(v) => write!(f, "{}", v),
            Real::Rational(v) => write!(f, "{}", v),
        }
    }
}

/// A complex value. The imaginary part is never zero; such values collapse
/// to their real component in [`Number::complex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cpx {
    pub(crate) re: Real,
    pub(crate) im: Real,
}

impl Cpx {
    pub fn re(&self) -> &Real {
        &self.re
    }

    pub fn im(&self) -> &Real {
        &self.im
    }

    pub fn neg(&self) -> Result<Cpx> {
        Ok(Cpx {
            re: self.re.neg()?,
            im: self.im.neg()?,
        })
    }
}

impl Display for Cpx {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}i)", self.re, self.im)
    }
}

/// The canonical numeric object flowing through the dispatch tables and
/// carried by internal-number tree nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(Int),
    Decimal(Dec),
    Rational(Rat),
    Complex(Cpx),
}

impl Number {
    /// Builds a complex number, collapsing a zero imaginary part.
    pub fn complex(re: Real, im: Real) -> Number {
        if im.is_zero() {
            re.into()
        } else {
            Number::Complex(Cpx { re, im })
        }
    }

    pub fn imaginary_unit(session: &Session) -> Number {
        Number::Complex(Cpx {
            re: Real::Integer(Int::zero(session)),
            im: Real::Integer(Int::one(session)),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Number::Integer(_) => "integer",
            Number::Decimal(_) => "decimal",
            Number::Rational(_) => "rational",
            Number::Complex(_) => "complex",
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_real().map(|r| r.is_zero()).unwrap_or(false)
    }

    /// True for the exact integer one; the multiplicative-unit test used
    /// when dropping factors.
    pub fn is_one(&self) -> bool {
        matches!(self, Number::Integer(v) if v.is_one())
    }

    pub fn is_negative(&self) -> bool {
        self.as_real().map(|r| r.is_negative()).unwrap_or(false)
    }

    pub fn as_real(&self) -> Option<Real> {
        match self {
            Number::Integer(v) => Some(Real::Integer(v.clone())),
            Number::Decimal(v) => Some(Real::Decimal(v.clone())),
            Number::Rational(v) => Some(Real::Rational(v.clone())),
            Number::Complex(_) => None,
        }
    }

    pub fn to_dec(&self, session: &Session) -> Result<Dec> {
        self.as_real()
            .ok_or(NumericError::Type {
                op: "decimal conversion",
                kind: "complex",
            })?
            .to_dec(session)
    }

    pub fn neg(&self) -> Result<Number> {
        Ok(match self {
            Number::Integer(v) => Number::Integer(v.neg()?),
            Number::Decimal(v) => Number::Decimal(v.neg()),
            Number::Rational(v) => Number::Rational(v.neg()?),
            Number::Complex(v) => Number::Complex(v.neg()?),
        })
    }
}

impl From<Real> for Number {
    fn from(value: Real) -> Self {
        match value {
            Real::Integer(v) => Number::Integer(v),
            Real::Decimal(v) => Number::Decimal(v),
            Real::Rational(v) => Number::Rational(v),
        }
    }
}

impl From<Int> for Number {
    fn from(value: Int) -> Self {
        Number::Integer(value)
    }
}

impl From<Dec> for Number {
    fn from(value: Dec) -> Self {
        Number::Decimal(value)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{}", v),
            Number::Decimal(v) => write!(f, "{}", v),
            Number::Rational(v) => write!(f, "{}", v),
            Number::Complex(v) => write!(f, "{}", v),
        }
    }
}

/// Re-establishes the canonical-form invariants on a value assembled from
/// parts: rationals are renormalized, complex values with a zero imaginary
/// part collapse to their real component. Values built through the public
/// constructors are already canonical, so this is idempotent.
pub fn canonicalize(n: Number) -> Result<Number> {
    Ok(match n {
        Number::Rational(r) => Real::from_ratio(r.num, r.den)?.into(),
        Number::Complex(c) => {
            let re = canonical_real(c.re)?;
            let im = canonical_real(c.im)?;
            Number::complex(re, im)
        }
        other => other,
    })
}

fn canonical_real(r: Real) -> Result<Real> {
    match r {
        Real::Rational(r) => Real::from_ratio(r.num, r.den),
        other => Ok(other),
    }
}

/// Absolute value. For a complex operand this is the modulus, computed as
/// a decimal.
pub fn absolute_value(n: &Number, session: &Session) -> Result<Number> {
    Ok(match n {
        Number::Integer(v) => Number::Integer(v.abs()?),
        Number::Decimal(v) => Number::Decimal(v.abs()),
        Number::Rational(v) => Number::Rational(v.abs()?),
        Number::Complex(c) => {
            let re = c.re.to_dec(session)?;
            let im = c.im.to_dec(session)?;
            let hyp = re
                .mul(&re, session)?
                .add(&im.mul(&im, session)?, session)?;
            Number::Decimal(hyp.sqrt(session))
        }
    })
}

/// Greatest common divisor; defined for integers only.
pub fn greatest_common_divisor(a: &Number, b: &Number) -> Result<Number> {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(a.gcd(b)?)),
        (other, Number::Integer(_)) | (_, other) => Err(NumericError::Type {
            op: "gcd",
            kind: other.kind(),
        }),
    }
}

/// Square root. Returns `None` when the result has no exact form and the
/// session is symbolic; negative reals produce a pure-imaginary complex.
pub fn square_root(n: &Number, session: &Session) -> Result<Option<Number>> {
    match n {
        Number::Integer(v) => {
            if v.is_negative() {
                return imaginary_sqrt(&Number::Integer(v.abs()?), session);
            }
            if let Some(root) = v.sqrt_exact() {
                return Ok(Some(Number::Integer(root)));
            }
            if session.numeric {
                let root = Dec::from_int(v, session).sqrt(session);
                Ok(Some(Number::Decimal(root)))
            } else {
                Ok(None)
            }
        }
        Number::Decimal(v) => {
            if v.is_negative() {
                let root = v.abs().sqrt(session);
                Ok(Some(Number::complex(
                    Real::Decimal(Dec::new(0.0, session)),
                    Real::Decimal(root),
                )))
            } else {
                Ok(Some(Number::Decimal(v.sqrt(session))))
            }
        }
        Number::Rational(v) => {
            if v.is_negative() {
                return imaginary_sqrt(&Number::Rational(v.abs()?), session);
            }
            if let (Some(num), Some(den)) = (v.num().sqrt_exact(), v.den().sqrt_exact()) {
                return Ok(Some(Real::from_ratio(num, den)?.into()));
            }
            if session.numeric {
                Ok(Some(Number::Decimal(v.to_dec(session)?.sqrt(session))))
            } else {
                Ok(None)
            }
        }
        Number::Complex(c) => {
            if !session.numeric {
                return Ok(None);
            }
            let a = c.re.to_dec(session)?;
            let b = c.im.to_dec(session)?;
            let half = Dec::new(0.5, session);
            let zero = Dec::new(0.0, session);
            crate::dispatch::complex_complex_exponentiation(&a, &b, &half, &zero, session)
                .map(Some)
        }
    }
}

fn imaginary_sqrt(magnitude: &Number, session: &Session) -> Result<Option<Number>> {
    let root = match square_root(magnitude, session)? {
        Some(root) => root,
        None => return Ok(None),
    };
    let root = match root.as_real() {
        Some(real) => real,
        None => {
            return Err(NumericError::Type {
                op: "square root",
                kind: root.kind(),
            })
        }
    };
    Ok(Some(Number::complex(
        Real::Integer(Int::zero(session)),
        root,
    )))
}

/// Rounds to an integer under the session's ambient rounding mode.
pub fn round_to_integer(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Integer(v) => Ok(Number::Integer(v.clone())),
        Number::Decimal(v) => {
            let rounded = v.round_to_integral(session.rounding, session);
            rounded
                .to_int_exact()
                .map(Number::Integer)
                .ok_or(NumericError::Overflow)
        }
        Number::Rational(v) => Ok(Number::Integer(
            v.num().div_round(v.den(), session.rounding)?,
        )),
        Number::Complex(_) => Err(NumericError::Type {
            op: "rounding",
            kind: "complex",
        }),
    }
}

/// Rounds so that at most `places` digits remain after the decimal point
/// (negative `places` rounds to tens, hundreds, ...). Exact kinds stay
/// exact.
pub fn round_to_decimal_places(n: &Number, places: i64, session: &Session) -> Result<Number> {
    match n {
        Number::Integer(v) => {
            if places >= 0 {
                return Ok(Number::Integer(v.clone()));
            }
            let scale = pow10_like(v, unsigned_exponent(places)?)?;
            let q = v.div_round(&scale, session.rounding)?;
            Ok(Number::Integer(q.mul(&scale)?))
        }
        Number::Rational(v) => {
            if places >= 0 {
                let scale = pow10_like(v.num(), unsigned_exponent(-places)?)?;
                let q = v.num().mul(&scale)?.div_round(v.den(), session.rounding)?;
                Ok(Real::from_ratio(q, scale)?.into())
            } else {
                let scale = pow10_like(v.num(), unsigned_exponent(places)?)?;
                let q = v
                    .num()
                    .div_round(&v.den().mul(&scale)?, session.rounding)?;
                Ok(Number::Integer(q.mul(&scale)?))
            }
        }
        Number::Decimal(v) => {
            let shifted = v.shift_decimal(places, session)?;
            let rounded = shifted.round_to_integral(session.rounding, session);
            Ok(Number::Decimal(rounded.shift_decimal(-places, session)?))
        }
        Number::Complex(_) => Err(NumericError::Type {
            op: "rounding",
            kind: "complex",
        }),
    }
}

/// Rounds to `digits` significant digits. `digits` must be positive.
pub fn round_to_precision(n: &Number, digits: u32, session: &Session) -> Result<Number> {
    if digits == 0 {
        return Err(NumericError::Domain("round to precision"));
    }
    if n.is_zero() {
        return Ok(n.clone());
    }
    let magnitude = absolute_value(n, session)?.to_dec(session)?.to_f64();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Ok(n.clone());
    }
    let exponent = magnitude.log10().floor() as i64;
    let places = digits as i64 - 1 - exponent;
    round_to_decimal_places(n, places, session)
}

fn unsigned_exponent(places: i64) -> Result<u32> {
    u32::try_from(places.unsigned_abs()).map_err(|_| NumericError::Overflow)
}

fn pow10_like(template: &Int, exponent: u32) -> Result<Int> {
    match template {
        Int::Small(_) => Int::Small(10).pow(exponent),
        Int::Big(_) => Ok(Int::Big(Integer::from(
            Integer::from(10).pow(exponent),
        ))),
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

    fn int(v: i64) -> Number {
        Number::Integer(Int::Small(v))
    }

    fn dec(v: f64) -> Number {
        Number::Decimal(Dec::Double(v))
    }

    fn rat(num: i64, den: i64) -> Number {
        Real::from_ratio(Int::Small(num), Int::Small(den))
            .unwrap()
            .into()
    }

    #[test]
    fn canonicalize_is_idempotent() {
        // assembled directly, bypassing from_ratio
        let raw = Number::Rational(Rat {
            num: Int::Small(6),
            den: Int::Small(-4),
        });
        let once = canonicalize(raw).unwrap();
        assert_eq!(once, rat(-3, 2));
        assert_eq!(canonicalize(once.clone()).unwrap(), once);

        let unit_den = Number::Rational(Rat {
            num: Int::Small(4),
            den: Int::Small(2),
        });
        assert_eq!(canonicalize(unit_den).unwrap(), int(2));

        let zero_im = Number::Complex(Cpx {
            re: Real::Integer(Int::Small(5)),
            im: Real::Rational(Rat {
                num: Int::Small(0),
                den: Int::Small(3),
            }),
        });
        assert_eq!(canonicalize(zero_im).unwrap(), int(5));
    }

    #[test]
    fn complex_with_zero_imaginary_collapses() {
        let n = Number::complex(
            Real::Integer(Int::Small(3)),
            Real::Integer(Int::Small(0)),
        );
        assert_eq!(n, int(3));
    }

    #[test]
    fn square_root_of_perfect_square_is_exact() {
        let s = fixed();
        assert_eq!(square_root(&int(49), &s).unwrap(), Some(int(7)));
        assert_eq!(square_root(&rat(9, 4), &s).unwrap(), Some(rat(3, 2)));
    }

    #[test]
    fn square_root_of_negative_is_pure_imaginary() {
        let s = fixed();
        let got = square_root(&int(-9), &s).unwrap().unwrap();
        assert_eq!(
            got,
            Number::complex(Real::Integer(Int::Small(0)), Real::Integer(Int::Small(3))),
        );
    }

    #[test]
    fn square_root_stays_symbolic_without_numeric_mode() {
        let s = Session {
            numeric: false,
            symbolic: true,
            arbitrary: false,
            ..Session::default()
        };
        assert_eq!(square_root(&int(2), &s).unwrap(), None);
        assert_eq!(square_root(&rat(1, 2), &s).unwrap(), None);
    }

    #[test]
    fn complex_modulus() {
        let s = fixed();
        let n = Number::complex(
            Real::Decimal(Dec::Double(3.0)),
            Real::Decimal(Dec::Double(4.0)),
        );
        assert_eq!(absolute_value(&n, &s).unwrap(), dec(5.0));
    }

    #[test]
    fn gcd_rejects_non_integers() {
        assert_eq!(greatest_common_divisor(&int(12), &int(18)).unwrap(), int(6));
        assert!(greatest_common_divisor(&int(12), &dec(6.0)).is_err());
    }

    #[test]
    fn rounding_a_rational_to_integer() {
        let mut s = fixed();
        s.rounding = RoundingMode::Floor;
        assert_eq!(round_to_integer(&rat(7, 2), &s).unwrap(), int(3));
        s.rounding = RoundingMode::Ceiling;
        assert_eq!(round_to_integer(&rat(7, 2), &s).unwrap(), int(4));
    }

    #[test]
    fn decimal_places_keep_exact_kinds_exact() {
        let s = fixed();
        assert_eq!(
            round_to_decimal_places(&rat(2, 3), 2, &s).unwrap(),
            rat(67, 100),
        );
        assert_eq!(round_to_decimal_places(&int(1234), -2, &s).unwrap(), int(1200));
        assert_eq!(
            round_to_decimal_places(&dec(2.346), 2, &s).unwrap(),
            dec(2.35),
        );
    }

    #[test]
    fn significant_digits() {
        let s = fixed();
        assert_eq!(round_to_precision(&int(12345), 2, &s).unwrap(), int(12000));
        assert_eq!(
            round_to_precision(&dec(0.0012345), 3, &s).unwrap(),
            dec(0.00123),
        );
        assert!(round_to_precision(&int(1), 0, &s).is_err());
    }
}
