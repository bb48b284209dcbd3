//! The tag-indexed rule registry and the recursive reduction driver.
//!
//! A node moves `unreduced → special rules → children → normal rules →
//! reduced`. Rules are tried in registration order within three precedence
//! bands; the first rule that returns `true` stops its phase. A rule that
//! fails converts its node into an `Error` tree and aborts the whole pass.

use std::collections::HashMap;

use log::{debug, trace};
use quill_arith::{NumericError, Session};
use quill_expr::{tags, Attr, Expr, ATTR_DESCRIPTION};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    /// A rule failed at the current node; the driver converts the node
    /// into an `Error` tree carrying this description.
    #[error("{0}")]
    Failed(String),
    /// A node deeper in the tree was already converted; unwind without
    /// touching the ancestors.
    #[error("reduction aborted")]
    Aborted,
}

impl From<NumericError> for ReductionError {
    fn from(e: NumericError) -> Self {
        ReductionError::Failed(e.to_string())
    }
}

/// A rewrite function. Returns `Ok(true)` when it mutated the node (its
/// phase then stops), `Ok(false)` when it does not apply.
pub type Reducer = fn(&mut Expr, &mut Context<'_>) -> Result<bool, ReductionError>;

/// What a rule sees while running: the session, plus the registry so that
/// a rule which rebuilds a subtree can re-reduce it.
pub struct Context<'a> {
    pub session: &'a mut Session,
    registry: &'a Registry,
}

impl Context<'_> {
    pub fn reduce(&mut self, expr: &mut Expr) -> Result<(), ReductionError> {
        self.registry.reduce_node(expr, self.session)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    High,
    Normal,
    Low,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub run: Reducer,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleOptions {
    /// Special rules run before the node's children are reduced.
    pub special: bool,
    /// Symbolic rules only run when the session enables symbolic mode.
    pub symbolic: bool,
    pub precedence: Precedence,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            special: false,
            symbolic: false,
            precedence: Precedence::Normal,
        }
    }
}

/// One tag's rules in a single pool, kept in three contiguous precedence
/// bands. The two indices mark the band boundaries so that insertion
/// preserves registration order within a band.
#[derive(Default)]
struct RulePool {
    rules: Vec<Rule>,
    high_end: usize,
    normal_end: usize,
}

impl RulePool {
    fn add(&mut self, rule: Rule, precedence: Precedence) {
        match precedence {
            Precedence::High => {
                self.rules.insert(self.high_end, rule);
                self.high_end += 1;
                self.normal_end += 1;
            }
            Precedence::Normal => {
                self.rules.insert(self.normal_end, rule);
                self.normal_end += 1;
            }
            Precedence::Low => self.rules.push(rule),
        }
    }
}

/// The append-only rule registry: four pools per tag, two of which gate on
/// the session's symbolic flag.
#[derive(Default)]
pub struct Registry {
    special: HashMap<String, RulePool>,
    special_symbolic: HashMap<String, RulePool>,
    normal: HashMap<String, RulePool>,
    normal_symbolic: HashMap<String, RulePool>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn add(&mut self, tag: &str, rule: Rule, opts: RuleOptions) {
        let pools = match (opts.special, opts.symbolic) {
            (true, false) => &mut self.special,
            (true, true) => &mut self.special_symbolic,
            (false, false) => &mut self.normal,
            (false, true) => &mut self.normal_symbolic,
        };
        pools
            .entry(tag.to_string())
            .or_default()
            .add(rule, opts.precedence);
    }

    /// Reduces one node (and, through recursion, its subtree). On failure
    /// the offending node has already been rewritten into an `Error` tree
    /// and the returned error only unwinds the pass.
    pub(crate) fn reduce_node(
        &self,
        expr: &mut Expr,
        session: &mut Session,
    ) -> Result<(), ReductionError> {
        if expr.is_reduced() {
            return Ok(());
        }

        if self.run_phase(expr, session, true)? {
            expr.set_reduced();
            return Ok(());
        }

        let mut index = 0;
        while index < expr.child_count() {
            let child = &mut expr.children_mut()[index];
            if !child.is_reduced() {
                self.reduce_node(child, session)?;
            }
            index += 1;
        }

        self.run_phase(expr, session, false)?;
        expr.set_reduced();
        Ok(())
    }

    fn run_phase(
        &self,
        expr: &mut Expr,
        session: &mut Session,
        special: bool,
    ) -> Result<bool, ReductionError> {
        let (plain, symbolic) = if special {
            (&self.special, &self.special_symbolic)
        } else {
            (&self.normal, &self.normal_symbolic)
        };
        let tag = expr.tag().to_string();
        let mut rules: Vec<Rule> = Vec::new();
        if let Some(pool) = plain.get(&tag) {
            rules.extend_from_slice(&pool.rules);
        }
        if session.symbolic {
            if let Some(pool) = symbolic.get(&tag) {
                rules.extend_from_slice(&pool.rules);
            }
        }

        let mut ctx = Context {
            session,
            registry: self,
        };
        for rule in rules {
            match (rule.run)(expr, &mut ctx) {
                Ok(true) => {
                    trace!("rule {} fired on {}", rule.name, tag);
                    return Ok(true);
                }
                Ok(false) => {}
                Err(ReductionError::Aborted) => return Err(ReductionError::Aborted),
                Err(ReductionError::Failed(description)) => {
                    debug!("rule {} failed on {}: {}", rule.name, tag, description);
                    set_in_error(expr, &description);
                    return Err(ReductionError::Aborted);
                }
            }
        }
        Ok(false)
    }
}

/// Rewrites a node in place into an `Error` tree that wraps the original
/// subtree and carries a human-readable description.
pub fn set_in_error(expr: &mut Expr, description: &str) {
    let original = std::mem::replace(expr, Expr::new(tags::ERROR));
    expr.set_attr(ATTR_DESCRIPTION, Attr::Text(description.to_string()));
    expr.add_child(original);
    expr.set_reduced();
}

/// Generic template: a unary distributive operator over an addition
/// distributes over the addition's terms, `f(x₁ + x₂ + …)` becoming
/// `f(x₁) + f(x₂) + …`. An empty addition absorbs the operator.
pub fn expansion(expr: &mut Expr, ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
    if expr.child_count() != 1 || expr.child(0).map(Expr::tag) != Some(tags::ADDITION) {
        return Ok(false);
    }
    let op = expr.tag().to_string();
    let sum = expr.remove_child_at(0);
    if sum.child_count() == 0 {
        expr.replace_by(sum);
        return Ok(true);
    }
    let mut distributed = Expr::new(tags::ADDITION);
    for term in sum.children() {
        distributed.add_child(Expr::with_children(op.clone(), vec![term.clone()]));
    }
    expr.replace_by(distributed);
    ctx.reduce(expr)?;
    Ok(true)
}

/// Generic template: splices same-tag children of a declared-associative
/// operator into the parent, `a @ (b @ c) @ d` becoming `a @ b @ c @ d`.
/// Runs as a structural prepass, so it never claims the node.
pub fn flatten_associative(
    expr: &mut Expr,
    _ctx: &mut Context<'_>,
) -> Result<bool, ReductionError> {
    let tag = expr.tag().to_string();
    let mut index = 0;
    while index < expr.child_count() {
        if expr.children()[index].tag() == tag {
            let nested = expr.remove_child_at(index);
            let mut offset = index;
            for grandchild in nested.children() {
                expr.add_child_at(offset, grandchild.clone());
                offset += 1;
            }
            // re-examine the splice point: the first grandchild may nest
        } else {
            index += 1;
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_arith::{Int, Number};

    fn int(v: i64) -> Expr {
        Expr::internal_number(Number::Integer(Int::Small(v)))
    }

    fn replace_with_seven(expr: &mut Expr, _ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
        expr.replace_by(int(7));
        Ok(true)
    }

    fn replace_with_eight(expr: &mut Expr, _ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
        expr.replace_by(int(8));
        Ok(true)
    }

    fn always_fail(_expr: &mut Expr, _ctx: &mut Context<'_>) -> Result<bool, ReductionError> {
        Err(ReductionError::Failed("nope".to_string()))
    }

    #[test]
    fn high_precedence_fires_first() {
        let mut registry = Registry::new();
        registry.add(
            "T",
            Rule { name: "normal", run: replace_with_eight },
            RuleOptions::default(),
        );
        registry.add(
            "T",
            Rule { name: "high", run: replace_with_seven },
            RuleOptions {
                precedence: Precedence::High,
                ..RuleOptions::default()
            },
        );
        let mut session = Session::default();
        let mut expr = Expr::new("T");
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(expr, int(7));
    }

    #[test]
    fn registration_order_within_a_band() {
        let mut registry = Registry::new();
        registry.add(
            "T",
            Rule { name: "first", run: replace_with_seven },
            RuleOptions::default(),
        );
        registry.add(
            "T",
            Rule { name: "second", run: replace_with_eight },
            RuleOptions::default(),
        );
        let mut session = Session::default();
        let mut expr = Expr::new("T");
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(expr, int(7));
    }

    #[test]
    fn symbolic_rules_gate_on_the_session() {
        let mut registry = Registry::new();
        registry.add(
            "T",
            Rule { name: "sym", run: replace_with_seven },
            RuleOptions {
                symbolic: true,
                ..RuleOptions::default()
            },
        );
        let mut expr = Expr::new("T");

        let mut session = Session::default();
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(expr, Expr::new("T"));

        expr.clear_reduced_recursive();
        session.symbolic = true;
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(expr, int(7));
    }

    #[test]
    fn failure_converts_the_node_and_aborts() {
        let mut registry = Registry::new();
        registry.add(
            "T",
            Rule { name: "fail", run: always_fail },
            RuleOptions::default(),
        );
        let mut session = Session::default();
        let mut expr = Expr::with_children("Outer", vec![Expr::new("T")]);
        let err = registry.reduce_node(&mut expr, &mut session).unwrap_err();
        assert_eq!(err, ReductionError::Aborted);

        let failed = &expr.children()[0];
        assert_eq!(failed.tag(), tags::ERROR);
        assert_eq!(failed.text_attr(ATTR_DESCRIPTION), Some("nope"));
        assert_eq!(failed.children()[0], Expr::new("T"));
        // the outer node was left untouched by the abort
        assert_eq!(expr.tag(), "Outer");
    }

    #[test]
    fn reduced_nodes_are_not_revisited() {
        let mut registry = Registry::new();
        registry.add(
            "T",
            Rule { name: "seven", run: replace_with_seven },
            RuleOptions::default(),
        );
        let mut session = Session::default();
        let mut expr = Expr::new("T");
        expr.set_reduced();
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(expr, Expr::new("T"));
    }

    #[test]
    fn flattening_splices_nested_operators() {
        let mut registry = Registry::new();
        registry.add(
            tags::ADDITION,
            Rule { name: "flatten", run: flatten_associative },
            RuleOptions {
                special: true,
                ..RuleOptions::default()
            },
        );
        let mut session = Session::default();
        let nested = Expr::with_children(
            tags::ADDITION,
            vec![
                Expr::new("a"),
                Expr::with_children(
                    tags::ADDITION,
                    vec![
                        Expr::new("b"),
                        Expr::with_children(tags::ADDITION, vec![Expr::new("c")]),
                    ],
                ),
                Expr::new("d"),
            ],
        );
        let mut expr = nested;
        registry.reduce_node(&mut expr, &mut session).unwrap();
        assert_eq!(
            expr,
            Expr::with_children(
                tags::ADDITION,
                vec![Expr::new("a"), Expr::new("b"), Expr::new("c"), Expr::new("d")],
            ),
        );
    }
}
