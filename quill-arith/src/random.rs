//! Uniform random values at the session precision.
//!
//! The arbitrary-precision paths draw bytes from the operating system's
//! entropy source so that the distribution does not collapse to 53 bits.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use rug::integer::Order;
use rug::{Float, Integer};

use crate::dec::Dec;
use crate::error::{NumericError, Result};
use crate::int::Int;
use crate::number::Number;
use crate::session::Session;

/// A uniform decimal in `[0, 1)`.
pub fn random(session: &Session) -> Number {
    if session.arbitrary {
        let bits = session.float_prec();
        let nbytes = bits.div_ceil(8) as usize;
        let mut buf = vec![0u8; nbytes];
        OsRng.fill_bytes(&mut buf);
        let raw = Integer::from_digits(&buf, Order::Lsf);
        let value = Float::with_val(session.float_prec(), raw) >> (nbytes as u32 * 8);
        Number::Decimal(Dec::Big(value))
    } else {
        Number::Decimal(Dec::Double(OsRng.gen::<f64>()))
    }
}

/// A uniform integer between the two integer bounds, inclusive. The bounds
/// may arrive in either order.
pub fn random_in_range(a: &Number, b: &Number, _session: &Session) -> Result<Number> {
    let (lo, hi) = match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => {
            if x.cmp_int(y) == std::cmp::Ordering::Greater {
                (y, x)
            } else {
                (x, y)
            }
        }
        (other, Number::Integer(_)) | (_, other) => {
            return Err(NumericError::Type {
                op: "random in range",
                kind: other.kind(),
            })
        }
    };
    match (lo, hi) {
        (Int::Small(lo), Int::Small(hi)) => {
            Ok(Number::Integer(Int::Small(OsRng.gen_range(*lo..=*hi))))
        }
        _ => {
            let lo = lo.to_integer();
            let amplitude = Integer::from(hi.to_integer() - &lo) + 1u32;
            // extra width keeps the modulo bias negligible
            let nbytes = (amplitude.significant_bits() + 64).div_ceil(8) as usize;
            let mut buf = vec![0u8; nbytes];
            OsRng.fill_bytes(&mut buf);
            let raw = Integer::from_digits(&buf, Order::Lsf);
            Ok(Number::Integer(Int::Big(raw % amplitude + lo)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::ops::Pow;

    #[test]
    fn random_is_in_the_unit_interval() {
        let s = Session::default();
        for _ in 0..32 {
            match random(&s) {
                Number::Decimal(d) => {
                    let v = d.to_f64();
                    assert!((0.0..1.0).contains(&v), "out of range: {v}");
                }
                other => panic!("expected a decimal, got {other:?}"),
            }
        }
    }

    #[test]
    fn range_is_inclusive_and_order_insensitive() {
        let s = Session {
            arbitrary: false,
            ..Session::default()
        };
        for _ in 0..64 {
            let n = random_in_range(
                &Number::Integer(Int::Small(10)),
                &Number::Integer(Int::Small(-10)),
                &s,
            )
            .unwrap();
            match n {
                Number::Integer(Int::Small(v)) => assert!((-10..=10).contains(&v)),
                other => panic!("expected a fixed integer, got {other:?}"),
            }
        }
    }

    #[test]
    fn degenerate_range() {
        let s = Session {
            arbitrary: false,
            ..Session::default()
        };
        let n = random_in_range(
            &Number::Integer(Int::Small(5)),
            &Number::Integer(Int::Small(5)),
            &s,
        )
        .unwrap();
        assert_eq!(n, Number::Integer(Int::Small(5)));
    }

    #[test]
    fn big_bounds_stay_in_range() {
        let s = Session::default();
        let lo = Int::Big(Integer::from(10).pow(30));
        let hi = Int::Big(Integer::from(10).pow(30) + 1000u32);
        for _ in 0..16 {
            let n = random_in_range(
                &Number::Integer(lo.clone()),
                &Number::Integer(hi.clone()),
                &s,
            )
            .unwrap();
            match n {
                Number::Integer(v) => {
                    assert!(v.cmp_int(&lo) != std::cmp::Ordering::Less);
                    assert!(v.cmp_int(&hi) != std::cmp::Ordering::Greater);
                }
                other => panic!("expected an integer, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_integer_bounds() {
        let s = Session::default();
        assert!(random_in_range(
            &Number::Decimal(Dec::Double(0.5)),
            &Number::Integer(Int::Small(3)),
            &s,
        )
        .is_err());
    }
}
