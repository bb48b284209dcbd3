//! The built-in rule set and the registry it populates.

pub mod arithmetic;
pub mod functions;
pub mod rounding;

use quill_arith::Number;
use quill_expr::{tags, Expr};

use crate::manager::{expansion, flatten_associative, Precedence, Registry, Rule, RuleOptions};

/// The numeric payload of the node's only child, when it has exactly one
/// child and that child is an internal number.
pub(crate) fn single_number(expr: &Expr) -> Option<Number> {
    if expr.child_count() != 1 {
        return None;
    }
    expr.children()[0].as_number().cloned()
}

/// The numeric payloads of the node's two children.
pub(crate) fn two_numbers(expr: &Expr) -> Option<(Number, Number)> {
    if expr.child_count() != 2 {
        return None;
    }
    let a = expr.children()[0].as_number()?.clone();
    let b = expr.children()[1].as_number()?.clone();
    Some((a, b))
}

/// True when the value has no decimal component; exact values stay
/// symbolic when the session is not numeric.
pub(crate) fn is_exact(n: &Number) -> bool {
    match n {
        Number::Decimal(_) => false,
        Number::Complex(c) => {
            !matches!(c.re(), quill_arith::Real::Decimal(_))
                && !matches!(c.im(), quill_arith::Real::Decimal(_))
        }
        _ => true,
    }
}

/// Builds the registry of built-in rules. Called once, through the global
/// lazy instance.
pub fn builtin() -> Registry {
    let mut r = Registry::new();
    let special = RuleOptions {
        special: true,
        precedence: Precedence::High,
        ..RuleOptions::default()
    };
    let normal = RuleOptions::default();

    r.add(
        tags::ADDITION,
        Rule { name: "flatten nested additions", run: flatten_associative },
        special,
    );
    r.add(
        tags::MULTIPLICATION,
        Rule { name: "flatten nested multiplications", run: flatten_associative },
        special,
    );
    r.add(
        tags::NEGATIVE,
        Rule { name: "distribute negation over addition", run: expansion },
        special,
    );

    r.add(
        tags::NEGATIVE,
        Rule { name: "negate a number", run: arithmetic::negative },
        normal,
    );
    r.add(
        tags::ADDITION,
        Rule { name: "fold numeric terms", run: arithmetic::addition },
        normal,
    );
    r.add(
        tags::MULTIPLICATION,
        Rule { name: "fold numeric factors", run: arithmetic::multiplication },
        normal,
    );
    r.add(
        tags::DIVISION,
        Rule { name: "divide numbers", run: arithmetic::division },
        normal,
    );
    r.add(
        tags::EXPONENTIATION,
        Rule { name: "raise to a numeric power", run: arithmetic::exponentiation },
        normal,
    );
    r.add(
        tags::DIV,
        Rule { name: "integer quotient", run: arithmetic::div },
        normal,
    );
    r.add(
        tags::MOD,
        Rule { name: "integer remainder", run: arithmetic::modulo },
        normal,
    );
    r.add(
        tags::DIV_MOD,
        Rule { name: "integer quotient and remainder", run: arithmetic::div_mod },
        normal,
    );

    r.add(
        tags::FLOOR,
        Rule { name: "floor", run: rounding::floor },
        normal,
    );
    r.add(
        tags::CEILING,
        Rule { name: "ceiling", run: rounding::ceiling },
        normal,
    );
    r.add(
        tags::TRUNCATION,
        Rule { name: "truncate", run: rounding::truncation },
        normal,
    );
    r.add(
        tags::ROUNDING,
        Rule { name: "round to nearest", run: rounding::rounding },
        normal,
    );
    r.add(
        tags::ROUND_TO_INTEGER,
        Rule { name: "round to integer", run: rounding::round_to_integer },
        normal,
    );
    r.add(
        tags::ROUND_TO_DECIMAL_PLACES,
        Rule { name: "round to decimal places", run: rounding::round_to_decimal_places },
        normal,
    );
    r.add(
        tags::ROUND_TO_PRECISION,
        Rule { name: "round to significant digits", run: rounding::round_to_precision },
        normal,
    );

    r.add(
        tags::SQUARE_ROOT,
        Rule { name: "numeric square root", run: functions::square_root },
        normal,
    );
    r.add(
        tags::ABSOLUTE_VALUE,
        Rule { name: "absolute value", run: functions::absolute_value },
        normal,
    );
    r.add(
        tags::GCD,
        Rule { name: "greatest common divisor", run: functions::gcd },
        normal,
    );
    r.add(
        tags::RANDOM,
        Rule { name: "uniform random decimal", run: functions::random },
        normal,
    );
    r.add(
        tags::RANDOM_IN_RANGE,
        Rule { name: "uniform random integer in range", run: functions::random_in_range },
        normal,
    );

    for (tag, rule) in functions::UNARY_NUMERIC_RULES {
        r.add(tag, *rule, normal);
    }
    r.add(
        tags::ARC_TANGENT2,
        Rule { name: "four-quadrant arctangent", run: functions::arc_tangent2 },
        normal,
    );

    r
}
