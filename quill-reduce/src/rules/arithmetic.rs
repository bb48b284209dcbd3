//! Rules for the arithmetic operator tags: folding numeric children,
//! absorption and unit elimination, and the division edge cases.

use quill_arith::{dispatch, Int, Number, NumericError};
use quill_expr::{tags, Expr};

use super::{single_number, two_numbers};
use crate::manager::{Context, ReductionError};

pub fn negative(expr: &mut Expr, _ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some(n) = single_number(expr) else {
        return Ok(false);
    };
    expr.replace_by(Expr::internal_number(n.neg()?));
    Ok(true)
}

/// Folds the internal-number terms of an addition into one. A zero sum is
/// dropped when symbolic terms remain; a lone surviving term replaces the
/// node.
pub fn addition(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let numeric = expr
        .children()
        .iter()
        .filter(|c| c.is_internal_number())
        .count();
    if numeric == 0 {
        return Ok(false);
    }
    if numeric == 1 && expr.child_count() > 1 {
        // a single zero term among symbolic siblings still folds away
        let lone_zero = expr
            .children()
            .iter()
            .find(|c| c.is_internal_number())
            .and_then(Expr::as_number)
            .map(Number::is_zero)
            .unwrap_or(false);
        if !lone_zero {
            return Ok(false);
        }
    }

    let mut sum: Option<Number> = None;
    let mut index = 0;
    while index < expr.child_count() {
        if let Some(n) = expr.children()[index].as_number().cloned() {
            expr.remove_child_at(index);
            sum = Some(match sum {
                Some(acc) => dispatch::addition(&acc, &n, ctx.session)?,
                None => n,
            });
        } else {
            index += 1;
        }
    }
    let sum = match sum {
        Some(sum) => sum,
        None => return Ok(false),
    };

    if expr.child_count() == 0 {
        expr.replace_by(Expr::internal_number(sum));
        return Ok(true);
    }
    if !sum.is_zero() {
        expr.add_child(Expr::internal_number(sum));
    }
    if expr.child_count() == 1 {
        let only = expr.remove_child_at(0);
        expr.replace_by(only);
    }
    Ok(true)
}

/// Folds the internal-number factors of a multiplication. A zero factor
/// absorbs the whole product; unit factors are dropped.
pub fn multiplication(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let zero = expr
        .children()
        .iter()
        .any(|c| c.as_number().map(Number::is_zero).unwrap_or(false));
    if zero {
        expr.replace_by(Expr::internal_number(Number::Integer(Int::new(
            0,
            ctx.session,
        ))));
        return Ok(true);
    }

    let numeric = expr
        .children()
        .iter()
        .filter(|c| c.is_internal_number())
        .count();
    if numeric == 0 {
        return Ok(false);
    }
    if numeric == 1 && expr.child_count() > 1 {
        let lone_unit = expr
            .children()
            .iter()
            .find(|c| c.is_internal_number())
            .and_then(Expr::as_number)
            .map(Number::is_one)
            .unwrap_or(false);
        if !lone_unit {
            return Ok(false);
        }
    }

    let mut product: Option<Number> = None;
    let mut index = 0;
    while index < expr.child_count() {
        if let Some(n) = expr.children()[index].as_number().cloned() {
            expr.remove_child_at(index);
            product = Some(match product {
                Some(acc) => dispatch::multiplication(&acc, &n, ctx.session)?,
                None => n,
            });
        } else {
            index += 1;
        }
    }
    let product = match product {
        Some(product) => product,
        None => return Ok(false),
    };

    if expr.child_count() == 0 {
        expr.replace_by(Expr::internal_number(product));
        return Ok(true);
    }
    if !product.is_one() {
        // the numeric factor leads, so externalization can restore a sign
        expr.add_child_at(0, Expr::internal_number(product));
    }
    if expr.child_count() == 1 {
        let only = expr.remove_child_at(0);
        expr.replace_by(only);
    }
    Ok(true)
}

/// Divides two internal numbers. A zero divisor under a non-zero dividend
/// becomes the infinity markers; `0 ÷ 0` fails the node.
pub fn division(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some((a, b)) = two_numbers(expr) else {
        return Ok(false);
    };
    match dispatch::division(&a, &b, ctx.session) {
        Ok(q) => {
            expr.replace_by(Expr::internal_number(q));
            Ok(true)
        }
        Err(NumericError::DivisionByZero) => {
            if a.is_zero() {
                return Err(ReductionError::Failed(
                    "0 / 0 is undefined".to_string(),
                ));
            }
            if a.is_negative() {
                let minus_one =
                    Expr::internal_number(Number::Integer(Int::new(-1, ctx.session)));
                expr.replace_by(Expr::with_children(
                    tags::MULTIPLICATION,
                    vec![minus_one, Expr::new(tags::INFINITY)],
                ));
            } else {
                expr.replace_by(Expr::new(tags::INFINITY));
            }
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

/// Raises one internal number to another. A combination that only has a
/// symbolic form in the current session is left untouched.
pub fn exponentiation(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some((base, exp)) = two_numbers(expr) else {
        return Ok(false);
    };
    match dispatch::exponentiation(&base, &exp, ctx.session) {
        Ok(p) => {
            expr.replace_by(Expr::internal_number(p));
            Ok(true)
        }
        Err(NumericError::NonNumeric) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn div(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    div_mod_parts(expr, ctx, true, false)
}

pub fn modulo(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    div_mod_parts(expr, ctx, false, true)
}

pub fn div_mod(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    div_mod_parts(expr, ctx, true, true)
}

fn div_mod_parts(
    expr: &mut Expr,
    ctx: &mut Context<'_>,
    want_div: bool,
    want_mod: bool,
) -> Result<bool, ReductionError> {
    let Some((a, b)) = two_numbers(expr) else {
        return Ok(false);
    };
    let (q, r) = dispatch::div_mod(&a, &b, want_div, want_mod, ctx.session)?;
    let replacement = match (q, r) {
        (Some(q), Some(r)) => Expr::with_children(
            tags::LIST,
            vec![Expr::internal_number(q), Expr::internal_number(r)],
        ),
        (Some(q), None) => Expr::internal_number(q),
        (None, Some(r)) => Expr::internal_number(r),
        (None, None) => return Ok(false),
    };
    expr.replace_by(replacement);
    Ok(true)
}
