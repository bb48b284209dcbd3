//! Kind-promotion tables for the binary operations.
//!
//! Every table is an exhaustive `match` over the operand kinds. The
//! diagonal delegates to the kind's own operation; off-diagonal arms
//! promote one operand and re-enter. Complex arms operate component-wise
//! and re-enter the table on the real components.

use std::cmp::Ordering;

use crate::dec::Dec;
use crate::error::{NumericError, Result};
use crate::int::Int;
use crate::number::{Cpx, Number, Real};
use crate::rounding::RoundingMode;
use crate::session::Session;
use crate::trig::{dec_cos, dec_exp, dec_ln, dec_sin};

/// Numeric comparison. Reals are totally ordered across kinds; a complex
/// operand only ever compares equal or not at all.
pub fn compare(a: &Number, b: &Number, session: &Session) -> Result<Option<Ordering>> {
    match (a, b) {
        (Number::Complex(x), Number::Complex(y)) => {
            let re_eq = x.re().cmp_real(y.re(), session)? == Ordering::Equal;
            let im_eq = x.im().cmp_real(y.im(), session)? == Ordering::Equal;
            Ok(if re_eq && im_eq {
                Some(Ordering::Equal)
            } else {
                None
            })
        }
        // a complex value with a non-zero imaginary part never equals a real
        (Number::Complex(_), _) | (_, Number::Complex(_)) => Ok(None),
        _ => {
            let (x, y) = (as_real(a)?, as_real(b)?);
            x.cmp_real(&y, session).map(Some)
        }
    }
}

pub fn addition(a: &Number, b: &Number, session: &Session) -> Result<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x.add(y)?)),
        (Number::Integer(x), Number::Rational(y)) | (Number::Rational(y), Number::Integer(x)) => {
            let num = x.mul(y.den())?.add(y.num())?;
            Ok(Real::from_ratio(num, y.den().clone())?.into())
        }
        (Number::Rational(x), Number::Rational(y)) => Ok(x.add(y)?.into()),
        (Number::Complex(x), Number::Complex(y)) => {
            let re = real_add(x.re(), y.re(), session)?;
            let im = real_add(x.im(), y.im(), session)?;
            Ok(Number::complex(re, im))
        }
        (Number::Complex(x), other) | (other, Number::Complex(x)) => {
            let re = real_add(x.re(), &as_real(other)?, session)?;
            Ok(Number::complex(re, x.im().clone()))
        }
        // at least one decimal operand remains
        _ => {
            let x = a.to_dec(session)?;
            let y = b.to_dec(session)?;
            Ok(Number::Decimal(x.add(&y, session)?))
        }
    }
}

pub fn subtraction(a: &Number, b: &Number, session: &Session) -> Result<Number> {
    addition(a, &b.neg()?, session)
}

pub fn multiplication(a: &Number, b: &Number, session: &Session) -> Result<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x.mul(y)?)),
        (Number::Integer(x), Number::Rational(y)) | (Number::Rational(y), Number::Integer(x)) => {
            Ok(Real::from_ratio(x.mul(y.num())?, y.den().clone())?.into())
        }
        (Number::Rational(x), Number::Rational(y)) => Ok(x.mul(y)?.into()),
        (Number::Complex(x), Number::Complex(y)) => {
            let ac = real_mul(x.re(), y.re(), session)?;
            let bd = real_mul(x.im(), y.im(), session)?;
            let ad = real_mul(x.re(), y.im(), session)?;
            let bc = real_mul(x.im(), y.re(), session)?;
            Ok(Number::complex(
                real_sub(&ac, &bd, session)?,
                real_add(&ad, &bc, session)?,
            ))
        }
        (Number::Complex(x), other) | (other, Number::Complex(x)) => {
            let factor = as_real(other)?;
            Ok(Number::complex(
                real_mul(x.re(), &factor, session)?,
                real_mul(x.im(), &factor, session)?,
            ))
        }
        _ => {
            let x = a.to_dec(session)?;
            let y = b.to_dec(session)?;
            Ok(Number::Decimal(x.mul(&y, session)?))
        }
    }
}

pub fn division(a: &Number, b: &Number, session: &Session) -> Result<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => {
            if session.numeric {
                if let Some(q) = x.divide_exact(y)? {
                    Ok(Number::Integer(q))
                } else {
                    let q = Dec::from_int(x, session).div(&Dec::from_int(y, session), session)?;
                    Ok(Number::Decimal(q))
                }
            } else {
                Ok(Real::from_ratio(x.clone(), y.clone())?.into())
            }
        }
        (Number::Integer(x), Number::Rational(y)) => {
            Ok(Real::from_ratio(x.mul(y.den())?, y.num().clone())?.into())
        }
        (Number::Rational(x), Number::Integer(y)) => {
            Ok(Real::from_ratio(x.num().clone(), x.den().mul(y)?)?.into())
        }
        (Number::Rational(x), Number::Rational(y)) => Ok(x.div(y)?.into()),
        (_, Number::Complex(y)) => divide_by_complex(a, y, session),
        (Number::Complex(x), other) => {
            let divisor = as_real(other)?;
            if divisor.is_zero() {
                return Err(NumericError::DivisionByZero);
            }
            Ok(Number::complex(
                real_div(x.re(), &divisor, session)?,
                real_div(x.im(), &divisor, session)?,
            ))
        }
        _ => {
            let x = a.to_dec(session)?;
            let y = b.to_dec(session)?;
            Ok(Number::Decimal(x.div(&y, session)?))
        }
    }
}

/// Division by a complex value through the conjugate: multiply the
/// dividend by the conjugate and divide component-wise by `re² + im²`.
fn divide_by_complex(a: &Number, divisor: &Cpx, session: &Session) -> Result<Number> {
    let conjugate = Number::complex(divisor.re().clone(), divisor.im().neg()?);
    let numerator = multiplication(a, &conjugate, session)?;
    let hyp = real_add(
        &real_mul(divisor.re(), divisor.re(), session)?,
        &real_mul(divisor.im(), divisor.im(), session)?,
        session,
    )?;
    division(&numerator, &hyp.into(), session)
}

pub fn exponentiation(a: &Number, b: &Number, session: &Session) -> Result<Number> {
    match (a, b) {
        (Number::Integer(base), Number::Integer(e)) => integer_pow(base, e, session),
        (Number::Rational(base), Number::Integer(e)) => rational_pow(base, e, session),
        (Number::Complex(base), Number::Integer(e)) => complex_integer_pow(base, e, session),

        // a decimal operand forces the numeric path
        (Number::Decimal(_), Number::Integer(_) | Number::Rational(_) | Number::Decimal(_))
        | (Number::Integer(_) | Number::Rational(_), Number::Decimal(_)) => {
            decimal_pow(&a.to_dec(session)?, &b.to_dec(session)?, session)
        }

        (Number::Integer(_) | Number::Rational(_), Number::Rational(_)) => {
            if !session.numeric {
                return Err(NumericError::NonNumeric);
            }
            decimal_pow(&a.to_dec(session)?, &b.to_dec(session)?, session)
        }

        (_, Number::Complex(e)) => {
            if !session.numeric && !has_decimal(a) && !has_decimal(b) {
                return Err(NumericError::NonNumeric);
            }
            let (x, y) = complex_parts(a, session)?;
            let c = e.re().to_dec(session)?;
            let d = e.im().to_dec(session)?;
            complex_complex_exponentiation(&x, &y, &c, &d, session)
        }
        (Number::Complex(base), _) => {
            if !session.numeric && !has_decimal(a) && !has_decimal(b) {
                return Err(NumericError::NonNumeric);
            }
            let x = base.re().to_dec(session)?;
            let y = base.im().to_dec(session)?;
            let c = b.to_dec(session)?;
            let d = Dec::new(0.0, session);
            complex_complex_exponentiation(&x, &y, &c, &d, session)
        }
    }
}

fn integer_pow(base: &Int, exponent: &Int, session: &Session) -> Result<Number> {
    if exponent.is_zero() {
        return Ok(Number::Integer(Int::one(session)));
    }
    if exponent.is_negative() {
        if base.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let magnitude = exponent.abs()?.to_u32().ok_or(NumericError::Overflow)?;
        return Ok(Real::from_ratio(Int::one(session), base.pow(magnitude)?)?.into());
    }
    let magnitude = exponent.to_u32().ok_or(NumericError::Overflow)?;
    Ok(Number::Integer(base.pow(magnitude)?))
}

fn rational_pow(base: &crate::rational::Rat, exponent: &Int, session: &Session) -> Result<Number> {
    if exponent.is_zero() {
        return Ok(Number::Integer(Int::one(session)));
    }
    if exponent.is_negative() {
        // invert the base and negate the exponent
        let inverted = base.recip()?;
        let positive = exponent.neg()?;
        return exponentiation(&inverted.into(), &Number::Integer(positive), session);
    }
    let magnitude = exponent.to_u32().ok_or(NumericError::Overflow)?;
    Ok(base.pow(magnitude)?.into())
}

fn decimal_pow(base: &Dec, exponent: &Dec, session: &Session) -> Result<Number> {
    if base.is_negative() && !exponent.is_integral() {
        let zero = Dec::new(0.0, session);
        return complex_complex_exponentiation(base, &zero, exponent, &zero, session);
    }
    if base.is_zero() && exponent.is_negative() {
        return Err(NumericError::DivisionByZero);
    }
    Ok(Number::Decimal(base.pow(exponent, session)?))
}

fn complex_integer_pow(base: &Cpx, exponent: &Int, session: &Session) -> Result<Number> {
    if exponent.is_zero() {
        return Ok(Number::Integer(Int::one(session)));
    }
    if exponent.is_negative() {
        let positive = exponent.neg()?;
        let power = complex_integer_pow(base, &positive, session)?;
        return division(&Number::Integer(Int::one(session)), &power, session);
    }
    if base.re().is_zero() {
        // (b·i)^e = b^e · i^e, keeping exact components exact
        let scale = exponentiation(
            &base.im().clone().into(),
            &Number::Integer(exponent.clone()),
            session,
        )?;
        let rotation = power_of_i(exponent, session)?;
        return multiplication(&scale, &rotation, session);
    }
    // exponentiation by squaring through the multiplication table
    let mut remaining = exponent.to_u32().ok_or(NumericError::Overflow)?;
    let mut factor = Number::Complex(base.clone());
    let mut result = Number::Integer(Int::one(session));
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = multiplication(&result, &factor, session)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = multiplication(&factor, &factor, session)?;
        }
    }
    Ok(result)
}

/// Powers of the imaginary unit cycle with period four.
pub fn power_of_i(exponent: &Int, session: &Session) -> Result<Number> {
    let four = Int::new(4, session);
    let floor = exponent.div_round(&four, RoundingMode::Euclidean)?;
    let residue = exponent.sub(&four.mul(&floor)?)?;
    Ok(match residue.to_i64() {
        Some(0) => Number::Integer(Int::one(session)),
        Some(1) => Number::imaginary_unit(session),
        Some(2) => Number::Integer(Int::one(session).neg()?),
        Some(3) => Number::complex(
            Real::Integer(Int::zero(session)),
            Real::Integer(Int::one(session).neg()?),
        ),
        _ => return Err(NumericError::RoundingMode),
    })
}

/// Shared polar-form algorithm for `(a + b·i) ^ (c + d·i)` on decimal
/// components. Every exponentiation pairing that leaves the exact kinds
/// funnels through here.
pub fn complex_complex_exponentiation(
    a: &Dec,
    b: &Dec,
    c: &Dec,
    d: &Dec,
    session: &Session,
) -> Result<Number> {
    if a.is_zero() && b.is_zero() {
        return if c.is_negative() || c.is_zero() {
            Err(NumericError::DivisionByZero)
        } else {
            Ok(Number::Decimal(Dec::new(0.0, session)))
        };
    }
    let r = a
        .mul(a, session)?
        .add(&b.mul(b, session)?, session)?
        .sqrt(session);
    let theta = b.atan2(a, session)?;

    // f = r^c · e^(−d·θ), arg = d·ln r + c·θ
    let f = r.pow(c, session)?.mul(
        &dec_exp(&d.neg().mul(&theta, session)?),
        session,
    )?;
    let arg = d
        .mul(&dec_ln(&r), session)?
        .add(&c.mul(&theta, session)?, session)?;

    let re = f.mul(&dec_cos(&arg), session)?;
    let im = f.mul(&dec_sin(&arg), session)?;
    Ok(Number::complex(Real::Decimal(re), Real::Decimal(im)))
}

/// Integer quotient and remainder of `a / b` under the session's ambient
/// rounding mode, with `D = d·q + r` always holding for whichever parts
/// the caller asked for.
pub fn div_mod(
    a: &Number,
    b: &Number,
    want_div: bool,
    want_mod: bool,
    session: &Session,
) -> Result<(Option<Number>, Option<Number>)> {
    if matches!(a, Number::Complex(_)) || matches!(b, Number::Complex(_)) {
        let offender = if matches!(a, Number::Complex(_)) { a } else { b };
        return Err(NumericError::Type {
            op: "div/mod",
            kind: offender.kind(),
        });
    }
    let quotient = match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => {
            Number::Integer(x.div_round(y, session.rounding)?)
        }
        _ => {
            let exact = division(a, b, session)?;
            let q = crate::number::round_to_integer(&exact, session)?;
            if session.rounding == RoundingMode::Euclidean {
                euclidean_quotient_fixup(a, b, q, session)?
            } else {
                q
            }
        }
    };
    let remainder = if want_mod {
        let product = multiplication(b, &quotient, session)?;
        Some(subtraction(a, &product, session)?)
    } else {
        None
    };
    Ok((want_div.then(|| quotient), remainder))
}

/// Floor-rounding the exact quotient leaves a negative remainder when the
/// divisor is negative; step the quotient by the divisor's sign so that
/// `0 <= r < |d|` holds again.
fn euclidean_quotient_fixup(
    a: &Number,
    b: &Number,
    q: Number,
    session: &Session,
) -> Result<Number> {
    let r = subtraction(a, &multiplication(b, &q, session)?, session)?;
    if !r.is_negative() {
        return Ok(q);
    }
    let step = Number::Integer(Int::one(session));
    if b.is_negative() {
        addition(&q, &step, session)
    } else {
        subtraction(&q, &step, session)
    }
}

fn as_real(n: &Number) -> Result<Real> {
    n.as_real().ok_or(NumericError::Type {
        op: "real dispatch",
        kind: "complex",
    })
}

fn complex_parts(n: &Number, session: &Session) -> Result<(Dec, Dec)> {
    match n {
        Number::Complex(c) => Ok((c.re().to_dec(session)?, c.im().to_dec(session)?)),
        other => Ok((other.to_dec(session)?, Dec::new(0.0, session))),
    }
}

fn has_decimal(n: &Number) -> bool {
    match n {
        Number::Decimal(_) => true,
        Number::Complex(c) => {
            matches!(c.re(), Real::Decimal(_)) || matches!(c.im(), Real::Decimal(_))
        }
        _ => false,
    }
}

fn real_add(a: &Real, b: &Real, session: &Session) -> Result<Real> {
    reenter(addition(&a.clone().into(), &b.clone().into(), session)?)
}

fn real_sub(a: &Real, b: &Real, session: &Session) -> Result<Real> {
    reenter(subtraction(&a.clone().into(), &b.clone().into(), session)?)
}

fn real_mul(a: &Real, b: &Real, session: &Session) -> Result<Real> {
    reenter(multiplication(&a.clone().into(), &b.clone().into(), session)?)
}

fn real_div(a: &Real, b: &Real, session: &Session) -> Result<Real> {
    reenter(division(&a.clone().into(), &b.clone().into(), session)?)
}

fn reenter(n: Number) -> Result<Real> {
    n.as_real().ok_or(NumericError::Type {
        op: "component arithmetic",
        kind: "complex",
    })
}
