//! Rules for the numeric function tags: square root, absolute value, gcd,
//! random generation, the trigonometric families and the transcendentals.

use quill_arith::{number, random, trig, Number};
use quill_expr::{tags, Expr};

use super::{is_exact, single_number, two_numbers};
use crate::manager::{Context, ReductionError, Rule};

pub fn square_root(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some(n) = single_number(expr) else {
        return Ok(false);
    };
    match number::square_root(&n, ctx.session)? {
        Some(root) => {
            expr.replace_by(Expr::internal_number(root));
            Ok(true)
        }
        // no exact form; the radical stays symbolic
        None => Ok(false),
    }
}

pub fn absolute_value(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some(n) = single_number(expr) else {
        return Ok(false);
    };
    expr.replace_by(Expr::internal_number(number::absolute_value(
        &n,
        ctx.session,
    )?));
    Ok(true)
}

/// Folds any number of integer children; gcd(0, n) = |n|.
pub fn gcd(expr: &mut Expr, _ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    if expr.child_count() < 2 {
        return Ok(false);
    }
    let mut values = Vec::with_capacity(expr.child_count());
    for child in expr.children() {
        match child.as_number() {
            Some(n) => values.push(n.clone()),
            None => return Ok(false),
        }
    }
    let mut acc = values[0].clone();
    for n in &values[1..] {
        acc = number::greatest_common_divisor(&acc, n)?;
    }
    expr.replace_by(Expr::internal_number(acc));
    Ok(true)
}

pub fn random(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    if expr.child_count() != 0 {
        return Ok(false);
    }
    expr.replace_by(Expr::internal_number(random::random(ctx.session)));
    Ok(true)
}

pub fn random_in_range(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some((a, b)) = two_numbers(expr) else {
        return Ok(false);
    };
    let value = random::random_in_range(&a, &b, ctx.session)?;
    expr.replace_by(Expr::internal_number(value));
    Ok(true)
}

pub fn arc_tangent2(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    let Some((y, x)) = two_numbers(expr) else {
        return Ok(false);
    };
    if !ctx.session.numeric && is_exact(&y) && is_exact(&x) {
        return Ok(false);
    }
    let value = trig::arc_tangent2(&y, &x, ctx.session)?;
    expr.replace_by(Expr::internal_number(value));
    Ok(true)
}

macro_rules! unary_numeric {
    ($name:ident, $func:path) => {
        pub fn $name(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
            let Some(n) = single_number(expr) else {
                return Ok(false);
            };
            // exact operands stay symbolic outside numeric mode
            if !ctx.session.numeric && is_exact(&n) {
                return Ok(false);
            }
            let result: Number = $func(&n, ctx.session)?;
            expr.replace_by(Expr::internal_number(result));
            Ok(true)
        }
    };
}

unary_numeric!(sine, trig::sine);
unary_numeric!(cosine, trig::cosine);
unary_numeric!(tangent, trig::tangent);
unary_numeric!(cotangent, trig::cotangent);
unary_numeric!(secant, trig::secant);
unary_numeric!(cosecant, trig::cosecant);
unary_numeric!(arc_sine, trig::arc_sine);
unary_numeric!(arc_cosine, trig::arc_cosine);
unary_numeric!(arc_tangent, trig::arc_tangent);
unary_numeric!(arc_cotangent, trig::arc_cotangent);
unary_numeric!(arc_secant, trig::arc_secant);
unary_numeric!(arc_cosecant, trig::arc_cosecant);
unary_numeric!(hyperbolic_sine, trig::hyperbolic_sine);
unary_numeric!(hyperbolic_cosine, trig::hyperbolic_cosine);
unary_numeric!(hyperbolic_tangent, trig::hyperbolic_tangent);
unary_numeric!(hyperbolic_cotangent, trig::hyperbolic_cotangent);
unary_numeric!(hyperbolic_secant, trig::hyperbolic_secant);
unary_numeric!(hyperbolic_cosecant, trig::hyperbolic_cosecant);
unary_numeric!(inverse_hyperbolic_sine, trig::inverse_hyperbolic_sine);
unary_numeric!(inverse_hyperbolic_cosine, trig::inverse_hyperbolic_cosine);
unary_numeric!(inverse_hyperbolic_tangent, trig::inverse_hyperbolic_tangent);
unary_numeric!(inverse_hyperbolic_cotangent, trig::inverse_hyperbolic_cotangent);
unary_numeric!(inverse_hyperbolic_secant, trig::inverse_hyperbolic_secant);
unary_numeric!(inverse_hyperbolic_cosecant, trig::inverse_hyperbolic_cosecant);
unary_numeric!(exponential, trig::exponential);
unary_numeric!(natural_logarithm, trig::natural_logarithm);

/// The single-argument numeric families, registered in one sweep.
pub(crate) static UNARY_NUMERIC_RULES: &[(&str, Rule)] = &[
    (tags::SINE, Rule { name: "sine", run: sine }),
    (tags::COSINE, Rule { name: "cosine", run: cosine }),
    (tags::TANGENT, Rule { name: "tangent", run: tangent }),
    (tags::COTANGENT, Rule { name: "cotangent", run: cotangent }),
    (tags::SECANT, Rule { name: "secant", run: secant }),
    (tags::COSECANT, Rule { name: "cosecant", run: cosecant }),
    (tags::ARC_SINE, Rule { name: "arcsine", run: arc_sine }),
    (tags::ARC_COSINE, Rule { name: "arccosine", run: arc_cosine }),
    (tags::ARC_TANGENT, Rule { name: "arctangent", run: arc_tangent }),
    (tags::ARC_COTANGENT, Rule { name: "arccotangent", run: arc_cotangent }),
    (tags::ARC_SECANT, Rule { name: "arcsecant", run: arc_secant }),
    (tags::ARC_COSECANT, Rule { name: "arccosecant", run: arc_cosecant }),
    (tags::HYPERBOLIC_SINE, Rule { name: "hyperbolic sine", run: hyperbolic_sine }),
    (tags::HYPERBOLIC_COSINE, Rule { name: "hyperbolic cosine", run: hyperbolic_cosine }),
    (tags::HYPERBOLIC_TANGENT, Rule { name: "hyperbolic tangent", run: hyperbolic_tangent }),
    (
        tags::HYPERBOLIC_COTANGENT,
        Rule { name: "hyperbolic cotangent", run: hyperbolic_cotangent },
    ),
    (tags::HYPERBOLIC_SECANT, Rule { name: "hyperbolic secant", run: hyperbolic_secant }),
    (
        tags::HYPERBOLIC_COSECANT,
        Rule { name: "hyperbolic cosecant", run: hyperbolic_cosecant },
    ),
    (
        tags::INVERSE_HYPERBOLIC_SINE,
        Rule { name: "inverse hyperbolic sine", run: inverse_hyperbolic_sine },
    ),
    (
        tags::INVERSE_HYPERBOLIC_COSINE,
        Rule { name: "inverse hyperbolic cosine", run: inverse_hyperbolic_cosine },
    ),
    (
        tags::INVERSE_HYPERBOLIC_TANGENT,
        Rule { name: "inverse hyperbolic tangent", run: inverse_hyperbolic_tangent },
    ),
    (
        tags::INVERSE_HYPERBOLIC_COTANGENT,
        Rule { name: "inverse hyperbolic cotangent", run: inverse_hyperbolic_cotangent },
    ),
    (
        tags::INVERSE_HYPERBOLIC_SECANT,
        Rule { name: "inverse hyperbolic secant", run: inverse_hyperbolic_secant },
    ),
    (
        tags::INVERSE_HYPERBOLIC_COSECANT,
        Rule { name: "inverse hyperbolic cosecant", run: inverse_hyperbolic_cosecant },
    ),
    (tags::EXPONENTIAL, Rule { name: "exponential", run: exponential }),
    (tags::NATURAL_LOGARITHM, Rule { name: "natural logarithm", run: natural_logarithm }),
];
