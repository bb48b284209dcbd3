//! The canonical number bridge: conversions between literal tree nodes and
//! the internal numeric objects that flow through reduction.
//!
//! Internalization is a depth-first prepass over the tree; externalization
//! is the inverse walk that re-establishes the external sign convention
//! (negative values become a `Negative` wrapper around a non-negative
//! literal).

use quill_arith::{Dec, Int, Number, NumericError, Real, Session};
use quill_expr::{tags, Expr, ATTR_LITERAL};

use crate::manager::set_in_error;

/// Outcome of inspecting one node for a numeric interpretation. Division
/// by a zero literal is a distinguished result, never an exception: the
/// walk turns it into the infinity marker nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Internalized {
    Number(Number),
    PositiveInfinity,
    NegativeInfinity,
    NotNumeric,
}

/// Interprets a single node (plus its optional `Negative` wrapper, literal
/// integer divisions, and the imaginary-unit symbol) as a canonical
/// numeric value.
pub fn internalize_node(expr: &Expr, session: &Session) -> Result<Internalized, NumericError> {
    match expr.tag() {
        tags::NUMBER => {
            let text = expr
                .text_attr(ATTR_LITERAL)
                .ok_or_else(|| NumericError::Conversion("missing literal".to_string()))?;
            parse_literal(text, session).map(Internalized::Number)
        }
        tags::IMAGINARY_UNIT => Ok(Internalized::Number(Number::imaginary_unit(session))),
        tags::NEGATIVE if expr.child_count() == 1 => {
            match internalize_node(&expr.children()[0], session)? {
                Internalized::Number(n) => Ok(Internalized::Number(n.neg()?)),
                Internalized::PositiveInfinity => Ok(Internalized::NegativeInfinity),
                Internalized::NegativeInfinity => Ok(Internalized::PositiveInfinity),
                Internalized::NotNumeric => Ok(Internalized::NotNumeric),
            }
        }
        tags::DIVISION if expr.child_count() == 2 => {
            let num = internalize_node(&expr.children()[0], session)?;
            let den = internalize_node(&expr.children()[1], session)?;
            match (num, den) {
                (
                    Internalized::Number(Number::Integer(n)),
                    Internalized::Number(Number::Integer(d)),
                ) => {
                    if d.is_zero() {
                        if n.is_zero() {
                            // 0/0 is left for the division rule to reject
                            Ok(Internalized::NotNumeric)
                        } else if n.is_negative() {
                            Ok(Internalized::NegativeInfinity)
                        } else {
                            Ok(Internalized::PositiveInfinity)
                        }
                    } else {
                        let q = quill_arith::dispatch::division(
                            &Number::Integer(n),
                            &Number::Integer(d),
                            session,
                        )?;
                        Ok(Internalized::Number(q))
                    }
                }
                _ => Ok(Internalized::NotNumeric),
            }
        }
        _ => Ok(Internalized::NotNumeric),
    }
}

fn parse_literal(text: &str, session: &Session) -> Result<Number, NumericError> {
    if text.contains(['.', 'e', 'E']) {
        Dec::parse(text, session).map(Number::Decimal)
    } else {
        Int::parse(text, session).map(Number::Integer)
    }
}

/// Replaces every numeric literal in the tree with an internal-number
/// node. A malformed literal becomes an in-tree `Error` node; the walk
/// continues elsewhere.
pub fn internalize_numbers(expr: &mut Expr, session: &Session) {
    match internalize_node(expr, session) {
        Ok(Internalized::Number(n)) => expr.replace_by(Expr::internal_number(n)),
        Ok(Internalized::PositiveInfinity) => expr.replace_by(Expr::new(tags::INFINITY)),
        Ok(Internalized::NegativeInfinity) => {
            let minus_one = Expr::internal_number(Number::Integer(Int::new(-1, session)));
            expr.replace_by(Expr::with_children(
                tags::MULTIPLICATION,
                vec![minus_one, Expr::new(tags::INFINITY)],
            ));
        }
        Ok(Internalized::NotNumeric) => {
            // sign handling stays uniform for the rules that follow
            if expr.tag() == tags::NEGATIVE && expr.child_count() == 1 {
                let inner = expr.remove_child_at(0);
                let minus_one = Expr::internal_number(Number::Integer(Int::new(-1, session)));
                expr.replace_by(Expr::with_children(
                    tags::MULTIPLICATION,
                    vec![minus_one, inner],
                ));
            }
            for child in expr.children_mut() {
                internalize_numbers(child, session);
            }
        }
        Err(e) => set_in_error(expr, &e.to_string()),
    }
}

/// Converts every internal-number node back to literal form and collapses
/// a leading `-1 ×` factor of a multiplication into a `Negative` wrapper.
pub fn externalize_numbers(expr: &mut Expr, session: &Session) {
    for child in expr.children_mut() {
        externalize_numbers(child, session);
    }
    if let Some(n) = expr.as_number() {
        let external = number_to_expr(n, session);
        expr.replace_by(external);
        return;
    }
    if expr.tag() == tags::MULTIPLICATION && leading_factor_is_minus_one(expr) {
        expr.remove_child_at(0);
        let inner = if expr.child_count() == 1 {
            expr.remove_child_at(0)
        } else {
            std::mem::replace(expr, Expr::new(tags::MULTIPLICATION))
        };
        expr.replace_by(Expr::with_children(tags::NEGATIVE, vec![inner]));
    }
}

fn leading_factor_is_minus_one(expr: &Expr) -> bool {
    if expr.child_count() < 2 {
        return false;
    }
    let first = &expr.children()[0];
    first.tag() == tags::NEGATIVE
        && first.child_count() == 1
        && first.children()[0].tag() == tags::NUMBER
        && first.children()[0].text_attr(ATTR_LITERAL) == Some("1")
}

/// Renders a canonical numeric value as literal tree nodes.
pub fn number_to_expr(n: &Number, session: &Session) -> Expr {
    match n {
        Number::Integer(_) | Number::Decimal(_) | Number::Rational(_) => {
            // the three real kinds share the sign convention
            match n.as_real() {
                Some(r) => real_to_expr(&r, session),
                None => Expr::new(tags::ERROR),
            }
        }
        Number::Complex(c) => {
            let im_part = imaginary_part_expr(c.im(), session);
            if c.re().is_zero() {
                im_part
            } else {
                Expr::with_children(
                    tags::ADDITION,
                    vec![real_to_expr(c.re(), session), im_part],
                )
            }
        }
    }
}

fn real_to_expr(r: &Real, session: &Session) -> Expr {
    let (negative, magnitude) = real_magnitude_expr(r, session);
    if negative {
        Expr::with_children(tags::NEGATIVE, vec![magnitude])
    } else {
        magnitude
    }
}

/// Splits a real into its sign and a non-negative literal subtree.
fn real_magnitude_expr(r: &Real, session: &Session) -> (bool, Expr) {
    match r {
        Real::Integer(v) => (
            v.is_negative(),
            Expr::number_literal(strip_sign(v.to_string())),
        ),
        Real::Decimal(d) => (d.is_negative(), Expr::number_literal(decimal_literal(d, session))),
        Real::Rational(q) => {
            let num = Expr::number_literal(strip_sign(q.num().to_string()));
            let den = Expr::number_literal(q.den().to_string());
            (
                q.is_negative(),
                Expr::with_children(tags::DIVISION, vec![num, den]),
            )
        }
    }
}

fn imaginary_part_expr(im: &Real, session: &Session) -> Expr {
    let (negative, magnitude) = real_magnitude_expr(im, session);
    let is_unit = matches!(im, Real::Integer(v) if v.abs().map(|a| a.is_one()).unwrap_or(false));
    let body = if is_unit {
        Expr::new(tags::IMAGINARY_UNIT)
    } else {
        Expr::with_children(
            tags::MULTIPLICATION,
            vec![magnitude, Expr::new(tags::IMAGINARY_UNIT)],
        )
    };
    if negative {
        Expr::with_children(tags::NEGATIVE, vec![body])
    } else {
        body
    }
}

fn strip_sign(text: String) -> String {
    text.strip_prefix('-').map(str::to_string).unwrap_or(text)
}

/// Formats a decimal magnitude so that it re-internalizes as a decimal
/// (the text always contains a point or an exponent).
fn decimal_literal(d: &Dec, session: &Session) -> String {
    match d {
        Dec::Double(v) => strip_sign(format!("{:?}", v)),
        Dec::Big(v) => {
            if v.is_zero() {
                return "0.0".to_string();
            }
            let (_, digits, exp) = v.to_sign_string_exp(10, Some(session.precision as usize));
            let exp = exp.unwrap_or(0);
            let digits = {
                let trimmed = digits.trim_end_matches('0');
                if trimmed.is_empty() { "0" } else { trimmed }
            };
            compose_decimal(digits, exp)
        }
    }
}

/// Builds a plain decimal string from digits `d₁d₂…` and exponent `e`,
/// where the value is `0.d₁d₂… × 10^e`. Falls back to scientific notation
/// outside a readable range.
fn compose_decimal(digits: &str, exp: i32) -> String {
    let len = digits.len() as i32;
    if exp <= 0 && exp >= -4 {
        format!("0.{}{}", "0".repeat(exp.unsigned_abs() as usize), digits)
    } else if exp > 0 && exp <= len {
        let (int_part, frac) = digits.split_at(exp as usize);
        if frac.is_empty() {
            format!("{int_part}.0")
        } else {
            format!("{int_part}.{frac}")
        }
    } else if exp > len && exp <= 15 {
        format!("{}{}.0", digits, "0".repeat((exp - len) as usize))
    } else {
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        format!("{head}.{tail}e{}", exp - 1)
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

    fn symbolic() -> Session {
        Session {
            arbitrary: false,
            numeric: false,
            symbolic: true,
            ..Session::default()
        }
    }

    fn num(text: &str) -> Expr {
        Expr::number_literal(text)
    }

    fn neg(inner: Expr) -> Expr {
        Expr::with_children(tags::NEGATIVE, vec![inner])
    }

    #[test]
    fn literal_round_trip() {
        let s = fixed();
        for literal in [num("42"), neg(num("42")), num("2.5"), neg(num("0.125"))] {
            let mut tree = literal.clone();
            internalize_numbers(&mut tree, &s);
            assert!(tree.is_internal_number(), "{literal}");
            externalize_numbers(&mut tree, &s);
            assert_eq!(tree, literal);
        }
    }

    #[test]
    fn big_decimal_round_trip() {
        let s = Session::default();
        for literal in [num("2.5"), num("0.1"), neg(num("123.456"))] {
            let mut tree = literal.clone();
            internalize_numbers(&mut tree, &s);
            externalize_numbers(&mut tree, &s);
            assert_eq!(tree, literal);
        }
    }

    #[test]
    fn integer_division_literals_become_rationals_in_symbolic_mode() {
        let s = symbolic();
        let mut tree = Expr::with_children(tags::DIVISION, vec![num("6"), num("4")]);
        internalize_numbers(&mut tree, &s);
        assert!(tree.is_internal_number());
        externalize_numbers(&mut tree, &s);
        assert_eq!(
            tree,
            Expr::with_children(tags::DIVISION, vec![num("3"), num("2")]),
        );
    }

    #[test]
    fn nonzero_over_zero_becomes_the_infinity_marker() {
        let s = fixed();
        let mut tree = Expr::with_children(tags::DIVISION, vec![num("1"), num("0")]);
        internalize_numbers(&mut tree, &s);
        assert_eq!(tree, Expr::new(tags::INFINITY));

        let mut tree = Expr::with_children(tags::DIVISION, vec![neg(num("1")), num("0")]);
        internalize_numbers(&mut tree, &s);
        assert_eq!(tree.tag(), tags::MULTIPLICATION);
        assert_eq!(tree.children()[1], Expr::new(tags::INFINITY));
    }

    #[test]
    fn negative_over_non_numbers_becomes_a_product() {
        let s = fixed();
        let mut tree = neg(Expr::new("x"));
        internalize_numbers(&mut tree, &s);
        assert_eq!(tree.tag(), tags::MULTIPLICATION);
        assert_eq!(
            tree.children()[0].as_number(),
            Some(&Number::Integer(Int::Small(-1))),
        );
        assert_eq!(tree.children()[1], Expr::new("x"));
    }

    #[test]
    fn externalizing_a_complex_value() {
        let s = fixed();
        let mut tree = Expr::internal_number(Number::complex(
            Real::Integer(Int::Small(2)),
            Real::Integer(Int::Small(-3)),
        ));
        externalize_numbers(&mut tree, &s);
        let expected = Expr::with_children(
            tags::ADDITION,
            vec![
                num("2"),
                neg(Expr::with_children(
                    tags::MULTIPLICATION,
                    vec![num("3"), Expr::new(tags::IMAGINARY_UNIT)],
                )),
            ],
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn pure_imaginary_externalizes_without_a_real_part() {
        let s = fixed();
        let mut tree = Expr::internal_number(Number::imaginary_unit(&s));
        externalize_numbers(&mut tree, &s);
        assert_eq!(tree, Expr::new(tags::IMAGINARY_UNIT));
    }

    #[test]
    fn decimal_zero_real_part_externalizes_as_pure_imaginary() {
        let s = fixed();
        let mut tree = Expr::internal_number(Number::complex(
            Real::Decimal(Dec::Double(0.0)),
            Real::Decimal(Dec::Double(2.5)),
        ));
        externalize_numbers(&mut tree, &s);
        assert_eq!(
            tree,
            Expr::with_children(
                tags::MULTIPLICATION,
                vec![num("2.5"), Expr::new(tags::IMAGINARY_UNIT)],
            ),
        );
    }

    #[test]
    fn imaginary_unit_internalizes() {
        let s = fixed();
        let mut tree = Expr::new(tags::IMAGINARY_UNIT);
        internalize_numbers(&mut tree, &s);
        assert_eq!(tree.as_number(), Some(&Number::imaginary_unit(&s)));
    }

    #[test]
    fn leading_minus_one_factor_collapses() {
        let s = fixed();
        let minus_one = Expr::internal_number(Number::Integer(Int::Small(-1)));
        let mut tree = Expr::with_children(
            tags::MULTIPLICATION,
            vec![minus_one, Expr::new("x"), Expr::new("y")],
        );
        externalize_numbers(&mut tree, &s);
        assert_eq!(
            tree,
            neg(Expr::with_children(
                tags::MULTIPLICATION,
                vec![Expr::new("x"), Expr::new("y")],
            )),
        );
    }

    #[test]
    fn malformed_literals_become_error_nodes() {
        let s = fixed();
        let mut tree = num("12x34");
        internalize_numbers(&mut tree, &s);
        assert_eq!(tree.tag(), tags::ERROR);
        assert_eq!(tree.children()[0], num("12x34"));
    }
}
