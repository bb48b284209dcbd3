//! The term-rewriting reduction engine.
//!
//! A reduction pass internalizes numeric literals, rewrites the tree to a
//! fixpoint under the tag-indexed rule registry, and externalizes the
//! results back to literal form. The built-in registry covers the
//! arithmetic, rounding, trigonometric and transcendental tags; hosts can
//! run a private [`Registry`] through [`reduce_with`].

pub mod bridge;
pub mod manager;
pub mod rules;

use log::debug;
use once_cell::sync::Lazy;
use quill_expr::Expr;

pub use bridge::{externalize_numbers, internalize_numbers, number_to_expr, Internalized};
pub use manager::{
    set_in_error, Context, Precedence, Reducer, ReductionError, Registry, Rule, RuleOptions,
};
pub use quill_arith::{RoundingMode, Session};

static REGISTRY: Lazy<Registry> = Lazy::new(rules::builtin);

/// The process-wide registry of built-in rules, populated once on first
/// use and append-only by construction.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Reduces a tree of internal numbers under the built-in registry. On a
/// rule failure the offending node has been rewritten into an `Error`
/// tree and the rest of the pass is skipped; the tree is always left
/// structurally valid.
pub fn reduce(expr: &mut Expr, session: &mut Session) {
    reduce_with(registry(), expr, session);
}

/// [`reduce`] under a caller-provided registry.
pub fn reduce_with(registry: &Registry, expr: &mut Expr, session: &mut Session) {
    expr.clear_reduced_recursive();
    if registry.reduce_node(expr, session).is_err() {
        debug!("reduction pass aborted by an in-tree error");
    }
}

/// Internalize, reduce and externalize as one unit: the entry point a
/// notebook host calls per edited expression.
pub fn evaluate(expr: &mut Expr, session: &mut Session) {
    internalize_numbers(expr, session);
    reduce(expr, session);
    externalize_numbers(expr, session);
}
