//! Trigonometric, hyperbolic and transcendental families.
//!
//! Integer and rational operands promote to decimal. Complex operands use
//! the component identities where the original system defines them; the
//! complex inverse families are a documented gap and raise
//! [`NumericError::Unimplemented`].

use rug::Float;

use crate::dec::Dec;
use crate::dispatch::division;
use crate::error::{NumericError, Result};
use crate::number::{Cpx, Number, Real};
use crate::session::Session;

pub(crate) fn dec_sin(d: &Dec) -> Dec {
    d.map(f64::sin, Float::sin)
}

pub(crate) fn dec_cos(d: &Dec) -> Dec {
    d.map(f64::cos, Float::cos)
}

fn dec_tan(d: &Dec) -> Dec {
    d.map(f64::tan, Float::tan)
}

fn dec_sinh(d: &Dec) -> Dec {
    d.map(f64::sinh, Float::sinh)
}

fn dec_cosh(d: &Dec) -> Dec {
    d.map(f64::cosh, Float::cosh)
}

fn dec_tanh(d: &Dec) -> Dec {
    d.map(f64::tanh, Float::tanh)
}

pub(crate) fn dec_exp(d: &Dec) -> Dec {
    d.map(f64::exp, Float::exp)
}

pub(crate) fn dec_ln(d: &Dec) -> Dec {
    d.map(f64::ln, Float::ln)
}

fn parts(c: &Cpx, session: &Session) -> Result<(Dec, Dec)> {
    Ok((c.re().to_dec(session)?, c.im().to_dec(session)?))
}

fn complex_dec(re: Dec, im: Dec) -> Number {
    Number::complex(Real::Decimal(re), Real::Decimal(im))
}

fn one(session: &Session) -> Number {
    Number::Decimal(Dec::new(1.0, session))
}

fn recip_dec(d: &Dec, session: &Session) -> Result<Dec> {
    Dec::new(1.0, session).div(d, session)
}

pub fn sine(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // sin(a + b·i) = sin a · cosh b + i · cos a · sinh b
            let re = dec_sin(&a).mul(&dec_cosh(&b), session)?;
            let im = dec_cos(&a).mul(&dec_sinh(&b), session)?;
            Ok(complex_dec(re, im))
        }
        _ => Ok(Number::Decimal(dec_sin(&n.to_dec(session)?))),
    }
}

pub fn cosine(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // cos(a + b·i) = cos a · cosh b − i · sin a · sinh b
            let re = dec_cos(&a).mul(&dec_cosh(&b), session)?;
            let im = dec_sin(&a).mul(&dec_sinh(&b), session)?.neg();
            Ok(complex_dec(re, im))
        }
        _ => Ok(Number::Decimal(dec_cos(&n.to_dec(session)?))),
    }
}

pub fn tangent(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => {
            let s = sine(n, session)?;
            let c = cosine(n, session)?;
            division(&s, &c, session)
        }
        _ => Ok(Number::Decimal(dec_tan(&n.to_dec(session)?))),
    }
}

pub fn cotangent(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => {
            let s = sine(n, session)?;
            let c = cosine(n, session)?;
            division(&c, &s, session)
        }
        _ => {
            let t = dec_tan(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&t, session)?))
        }
    }
}

pub fn secant(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => division(&one(session), &cosine(n, session)?, session),
        _ => {
            let c = dec_cos(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&c, session)?))
        }
    }
}

pub fn cosecant(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => division(&one(session), &sine(n, session)?, session),
        _ => {
            let s = dec_sin(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&s, session)?))
        }
    }
}

fn inverse_real(
    n: &Number,
    session: &Session,
    name: &'static str,
    in_domain: impl FnOnce(f64) -> bool,
    double: impl FnOnce(f64) -> f64,
    big: impl FnOnce(Float) -> Float,
) -> Result<Number> {
    match n {
        Number::Complex(_) => Err(NumericError::Unimplemented(name)),
        _ => {
            let d = n.to_dec(session)?;
            if !in_domain(d.to_f64()) {
                return Err(NumericError::Domain(name));
            }
            Ok(Number::Decimal(d.map(double, big)))
        }
    }
}

pub fn arc_sine(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(n, session, "arcsine", |v| (-1.0..=1.0).contains(&v), f64::asin, Float::asin)
}

pub fn arc_cosine(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(n, session, "arccosine", |v| (-1.0..=1.0).contains(&v), f64::acos, Float::acos)
}

pub fn arc_tangent(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(n, session, "arctangent", |_| true, f64::atan, Float::atan)
}

pub fn arc_cotangent(n: &Number, session: &Session) -> Result<Number> {
    // continuous branch with range (0, π), so the zero argument is defined
    inverse_real(
        n,
        session,
        "arccotangent",
        |_| true,
        |v| std::f64::consts::FRAC_PI_2 - v.atan(),
        |v| {
            let half_pi = Float::with_val(v.prec(), rug::float::Constant::Pi) / 2u32;
            half_pi - v.atan()
        },
    )
}

pub fn arc_secant(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "arcsecant",
        |v| v.abs() >= 1.0,
        |v| (1.0 / v).acos(),
        |v| v.recip().acos(),
    )
}

pub fn arc_cosecant(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "arccosecant",
        |v| v.abs() >= 1.0,
        |v| (1.0 / v).asin(),
        |v| v.recip().asin(),
    )
}

/// Four-quadrant arctangent; defined for real operands only.
pub fn arc_tangent2(y: &Number, x: &Number, session: &Session) -> Result<Number> {
    if matches!(y, Number::Complex(_)) || matches!(x, Number::Complex(_)) {
        return Err(NumericError::Type {
            op: "atan2",
            kind: "complex",
        });
    }
    let y = y.to_dec(session)?;
    let x = x.to_dec(session)?;
    Ok(Number::Decimal(y.atan2(&x, session)?))
}

pub fn hyperbolic_sine(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // sinh(a + b·i) = sinh a · cos b + i · cosh a · sin b
            let re = dec_sinh(&a).mul(&dec_cos(&b), session)?;
            let im = dec_cosh(&a).mul(&dec_sin(&b), session)?;
            Ok(complex_dec(re, im))
        }
        _ => Ok(Number::Decimal(dec_sinh(&n.to_dec(session)?))),
    }
}

pub fn hyperbolic_cosine(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // cosh(a + b·i) = cosh a · cos b + i · sinh a · sin b
            let re = dec_cosh(&a).mul(&dec_cos(&b), session)?;
            let im = dec_sinh(&a).mul(&dec_sin(&b), session)?;
            Ok(complex_dec(re, im))
        }
        _ => Ok(Number::Decimal(dec_cosh(&n.to_dec(session)?))),
    }
}

pub fn hyperbolic_tangent(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => {
            let s = hyperbolic_sine(n, session)?;
            let c = hyperbolic_cosine(n, session)?;
            division(&s, &c, session)
        }
        _ => Ok(Number::Decimal(dec_tanh(&n.to_dec(session)?))),
    }
}

pub fn hyperbolic_cotangent(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => {
            let s = hyperbolic_sine(n, session)?;
            let c = hyperbolic_cosine(n, session)?;
            division(&c, &s, session)
        }
        _ => {
            let t = dec_tanh(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&t, session)?))
        }
    }
}

pub fn hyperbolic_secant(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => division(&one(session), &hyperbolic_cosine(n, session)?, session),
        _ => {
            let c = dec_cosh(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&c, session)?))
        }
    }
}

pub fn hyperbolic_cosecant(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(_) => division(&one(session), &hyperbolic_sine(n, session)?, session),
        _ => {
            let s = dec_sinh(&n.to_dec(session)?);
            Ok(Number::Decimal(recip_dec(&s, session)?))
        }
    }
}

pub fn inverse_hyperbolic_sine(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(n, session, "arsinh", |_| true, f64::asinh, Float::asinh)
}

pub fn inverse_hyperbolic_cosine(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(n, session, "arcosh", |v| v >= 1.0, f64::acosh, Float::acosh)
}

pub fn inverse_hyperbolic_tangent(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "artanh",
        |v| v > -1.0 && v < 1.0,
        f64::atanh,
        Float::atanh,
    )
}

pub fn inverse_hyperbolic_cotangent(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "arcoth",
        |v| v.abs() > 1.0,
        |v| (1.0 / v).atanh(),
        |v| v.recip().atanh(),
    )
}

pub fn inverse_hyperbolic_secant(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "arsech",
        |v| v > 0.0 && v <= 1.0,
        |v| (1.0 / v).acosh(),
        |v| v.recip().acosh(),
    )
}

pub fn inverse_hyperbolic_cosecant(n: &Number, session: &Session) -> Result<Number> {
    inverse_real(
        n,
        session,
        "arcsch",
        |v| v != 0.0,
        |v| (1.0 / v).asinh(),
        |v| v.recip().asinh(),
    )
}

pub fn exponential(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // e^(a + b·i) = e^a · (cos b + i · sin b)
            let scale = dec_exp(&a);
            let re = scale.mul(&dec_cos(&b), session)?;
            let im = scale.mul(&dec_sin(&b), session)?;
            Ok(complex_dec(re, im))
        }
        _ => Ok(Number::Decimal(dec_exp(&n.to_dec(session)?))),
    }
}

pub fn natural_logarithm(n: &Number, session: &Session) -> Result<Number> {
    match n {
        Number::Complex(c) => {
            let (a, b) = parts(c, session)?;
            // ln(a + b·i) = ln r + i·θ in polar form
            let r = a
                .mul(&a, session)?
                .add(&b.mul(&b, session)?, session)?
                .sqrt(session);
            let theta = b.atan2(&a, session)?;
            Ok(complex_dec(dec_ln(&r), theta))
        }
        _ => {
            let d = n.to_dec(session)?;
            if d.is_zero() || d.is_negative() {
                return Err(NumericError::Domain("natural logarithm"));
            }
            Ok(Number::Decimal(dec_ln(&d)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int::Int;

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

    fn close(n: &Number, expected: f64) {
        match n {
            Number::Decimal(d) => {
                let got = d.to_f64();
                assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
            }
            other => panic!("expected a decimal, got {other:?}"),
        }
    }

    fn close_complex(n: &Number, re: f64, im: f64, session: &Session) {
        match n {
            Number::Complex(c) => {
                let got_re = c.re().to_dec(session).unwrap().to_f64();
                let got_im = c.im().to_dec(session).unwrap().to_f64();
                assert!((got_re - re).abs() < 1e-12, "re {got_re} vs {re}");
                assert!((got_im - im).abs() < 1e-12, "im {got_im} vs {im}");
            }
            other => panic!("expected a complex, got {other:?}"),
        }
    }

    #[test]
    fn integers_promote_to_decimal() {
        let s = fixed();
        close(&sine(&int(0), &s).unwrap(), 0.0);
        close(&cosine(&int(0), &s).unwrap(), 1.0);
        close(&exponential(&int(1), &s).unwrap(), std::f64::consts::E);
    }

    #[test]
    fn complex_sine_identity() {
        let s = fixed();
        let z = Number::complex(
            Real::Decimal(Dec::Double(1.0)),
            Real::Decimal(Dec::Double(2.0)),
        );
        let got = sine(&z, &s).unwrap();
        close_complex(
            &got,
            1f64.sin() * 2f64.cosh(),
            1f64.cos() * 2f64.sinh(),
            &s,
        );
    }

    #[test]
    fn complex_exponential_is_polar() {
        let s = fixed();
        // e^(iπ) = -1
        let z = Number::complex(
            Real::Decimal(Dec::Double(0.0)),
            Real::Decimal(Dec::Double(std::f64::consts::PI)),
        );
        let got = exponential(&z, &s).unwrap();
        match got {
            // the imaginary part is sin π, which is not exactly zero in f64
            Number::Complex(c) => {
                assert!((c.re().to_dec(&s).unwrap().to_f64() + 1.0).abs() < 1e-12);
                assert!(c.im().to_dec(&s).unwrap().to_f64().abs() < 1e-12);
            }
            Number::Decimal(d) => assert!((d.to_f64() + 1.0).abs() < 1e-12),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn logarithm_domain() {
        let s = fixed();
        assert_eq!(
            natural_logarithm(&int(-1), &s),
            Err(NumericError::Domain("natural logarithm")),
        );
        assert_eq!(
            natural_logarithm(&int(0), &s),
            Err(NumericError::Domain("natural logarithm")),
        );
        close(&natural_logarithm(&dec(std::f64::consts::E), &s).unwrap(), 1.0);
    }

    #[test]
    fn complex_logarithm() {
        let s = fixed();
        // ln(i) = iπ/2
        let i = Number::complex(
            Real::Decimal(Dec::Double(0.0)),
            Real::Decimal(Dec::Double(1.0)),
        );
        close_complex(
            &natural_logarithm(&i, &s).unwrap(),
            0.0,
            std::f64::consts::FRAC_PI_2,
            &s,
        );
    }

    #[test]
    fn inverse_domains() {
        let s = fixed();
        assert_eq!(
            arc_sine(&dec(1.5), &s),
            Err(NumericError::Domain("arcsine")),
        );
        assert_eq!(
            inverse_hyperbolic_cosine(&dec(0.5), &s),
            Err(NumericError::Domain("arcosh")),
        );
        close(&arc_sine(&dec(1.0), &s).unwrap(), std::f64::consts::FRAC_PI_2);
        close(&arc_cotangent(&int(0), &s).unwrap(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn complex_inverse_is_a_documented_gap() {
        let s = fixed();
        let z = Number::complex(
            Real::Integer(Int::Small(1)),
            Real::Integer(Int::Small(1)),
        );
        assert_eq!(
            arc_sine(&z, &s),
            Err(NumericError::Unimplemented("arcsine")),
        );
        assert_eq!(
            inverse_hyperbolic_tangent(&z, &s),
            Err(NumericError::Unimplemented("artanh")),
        );
    }

    #[test]
    fn atan2_of_two_zeros_is_undefined() {
        let s = fixed();
        assert_eq!(
            arc_tangent2(&int(0), &int(0), &s),
            Err(NumericError::DivisionByZero),
        );
        close(
            &arc_tangent2(&int(1), &int(1), &s).unwrap(),
            std::f64::consts::FRAC_PI_4,
        );
    }

    #[test]
    fn hyperbolic_reciprocal_family() {
        let s = fixed();
        close(&hyperbolic_secant(&int(0), &s).unwrap(), 1.0);
        assert_eq!(
            hyperbolic_cosecant(&int(0), &s),
            Err(NumericError::DivisionByZero),
        );
    }
}
