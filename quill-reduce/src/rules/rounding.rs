//! Rules for the rounding operator tags. The four named operators pin
//! their sub-mode through a scoped override of the session's rounding
//! mode; the `RoundTo*` operators honor the ambient mode.

use quill_arith::{number, Int, Number, RoundingMode};
use quill_expr::Expr;

use super::single_number;
use crate::manager::{Context, ReductionError};

fn round_with_mode(
    expr: &mut Expr,
    ctx: &mut Context<'_>,
    mode: RoundingMode,
) -> Result<bool, ReductionError> {
    let Some(n) = single_number(expr) else {
        return Ok(false);
    };
    let rounded = {
        let guard = ctx.session.override_rounding(mode);
        number::round_to_integer(&n, &guard)?
    };
    expr.replace_by(Expr::internal_number(rounded));
    Ok(true)
}

pub fn floor(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    round_with_mode(expr, ctx, RoundingMode::Floor)
}

pub fn ceiling(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    round_with_mode(expr, ctx, RoundingMode::Ceiling)
}

pub fn truncation(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    round_with_mode(expr, ctx, RoundingMode::TowardZero)
}

pub fn rounding(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    round_with_mode(expr, ctx, RoundingMode::HalfAwayFromZero)
}

pub fn round_to_integer(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some(n) = single_number(expr) else {
        return Ok(false);
    };
    let rounded = number::round_to_integer(&n, ctx.session)?;
    expr.replace_by(Expr::internal_number(rounded));
    Ok(true)
}

fn integer_argument(expr: &Expr, index: usize) -> Option<Int> {
    match expr.child(index)?.as_number()? {
        Number::Integer(v) => Some(v.clone()),
        _ => None,
    }
}

pub fn round_to_decimal_places(
    expr: &mut Expr,
    ctx: &mut Context<'_>,
) -> Result<bool, ReductionError> {
    if expr.child_count() != 2 {
        return Ok(false);
    }
    let Some(n) = expr.children()[0].as_number().cloned() else {
        return Ok(false);
    };
    let Some(places) = integer_argument(expr, 1).as_ref().and_then(Int::to_i64) else {
        return Ok(false);
    };
    let rounded = number::round_to_decimal_places(&n, places, ctx.session)?;
    expr.replace_by(Expr::internal_number(rounded));
    Ok(true)
}

pub fn round_to_precision(
    expr: &mut Expr,
    ctx: &mut Context<'_>,
) -> Result<bool, ReductionError> {
    if expr.child_count() != 2 {
        return Ok(false);
    }
    let Some(n) = expr.children()[0].as_number().cloned() else {
        return Ok(false);
    };
    let Some(digits) = integer_argument(expr, 1).as_ref().and_then(Int::to_u32) else {
        return Ok(false);
    };
    let rounded = number::round_to_precision(&n, digits, ctx.session)?;
    expr.replace_by(Expr::internal_number(rounded));
    Ok(true)
}
