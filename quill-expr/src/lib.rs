//! The expression-tree data model shared by the bridge and the reduction
//! engine.
//!
//! Trees are owned values. A node is a tag, an ordered child list and a
//! small attribute bag; numeric payloads ride in the `Value` attribute of
//! `Math.InternalNumber` nodes. The `reduced` flag memoizes reduction work
//! and is deliberately excluded from equality.

pub mod tags;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use quill_arith::Number;

/// Attribute name carrying the numeric payload of an internal number.
pub const ATTR_VALUE: &str = "Value";
/// Attribute name carrying the human-readable text of an `Error` node.
pub const ATTR_DESCRIPTION: &str = "Description";
/// Attribute name carrying the literal text of a `Math.Number` leaf.
pub const ATTR_LITERAL: &str = "Literal";

#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Number(Number),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Expr {
    tag: String,
    children: Vec<Expr>,
    attrs: BTreeMap<String, Attr>,
    reduced: bool,
}

impl Expr {
    pub fn new(tag: impl Into<String>) -> Expr {
        Expr {
            tag: tag.into(),
            children: Vec::new(),
            attrs: BTreeMap::new(),
            reduced: false,
        }
    }

    pub fn with_children(tag: impl Into<String>, children: Vec<Expr>) -> Expr {
        Expr {
            tag: tag.into(),
            children,
            attrs: BTreeMap::new(),
            reduced: false,
        }
    }

    /// A `Math.Number` literal leaf as produced by a host editor.
    pub fn number_literal(text: impl Into<String>) -> Expr {
        let mut e = Expr::new(tags::NUMBER);
        e.set_attr(ATTR_LITERAL, Attr::Text(text.into()));
        e
    }

    /// A `Math.InternalNumber` node carrying a canonical numeric value.
    pub fn internal_number(value: Number) -> Expr {
        let mut e = Expr::new(tags::INTERNAL_NUMBER);
        e.set_attr(ATTR_VALUE, Attr::Number(value));
        e
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Expr] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Expr> {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Option<&Expr> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn add_child(&mut self, child: Expr) {
        self.children.push(child);
    }

    pub fn add_child_at(&mut self, index: usize, child: Expr) {
        self.children.insert(index, child);
    }

    pub fn remove_child_at(&mut self, index: usize) -> Expr {
        self.children.remove(index)
    }

    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: Attr) {
        self.attrs.insert(name.into(), value);
    }

    pub fn text_attr(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(Attr::Text(t)) => Some(t),
            _ => None,
        }
    }

    pub fn is_internal_number(&self) -> bool {
        self.tag == tags::INTERNAL_NUMBER
    }

    /// The numeric payload of an internal-number node.
    pub fn as_number(&self) -> Option<&Number> {
        if !self.is_internal_number() {
            return None;
        }
        match self.attrs.get(ATTR_VALUE) {
            Some(Attr::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Replaces this node in place with another tree.
    pub fn replace_by(&mut self, new: Expr) {
        *self = new;
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub fn set_reduced(&mut self) {
        self.reduced = true;
    }

    pub fn clear_reduced(&mut self) {
        self.reduced = false;
    }

    /// Clears the memoization flag on the whole subtree, forcing the next
    /// reduction pass to revisit every node.
    pub fn clear_reduced_recursive(&mut self) {
        self.reduced = false;
        for child in &mut self.children {
            child.clear_reduced_recursive();
        }
    }
}

// the reduced flag is bookkeeping, not part of the tree's identity
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.attrs == other.attrs && self.children == other.children
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.as_number() {
            return write!(f, "#{}", n);
        }
        if let Some(text) = self.text_attr(ATTR_LITERAL) {
            return write!(f, "{}", text);
        }
        write!(f, "{}", self.tag)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_arith::Int;

    fn int(v: i64) -> Expr {
        Expr::internal_number(Number::Integer(Int::Small(v)))
    }

    #[test]
    fn equality_ignores_the_reduced_flag() {
        let a = int(7);
        let mut b = int(7);
        b.set_reduced();
        assert_eq!(a, b);
        assert_ne!(a, int(8));
    }

    #[test]
    fn replace_by_swaps_the_node_in_place() {
        let mut tree = Expr::with_children(tags::ADDITION, vec![int(1), int(2)]);
        tree.children_mut()[0].replace_by(int(5));
        assert_eq!(
            tree,
            Expr::with_children(tags::ADDITION, vec![int(5), int(2)]),
        );
    }

    #[test]
    fn clearing_the_flag_recursively() {
        let mut tree = Expr::with_children(tags::ADDITION, vec![int(1), int(2)]);
        tree.set_reduced();
        tree.children_mut()[1].set_reduced();
        tree.clear_reduced_recursive();
        assert!(!tree.is_reduced());
        assert!(!tree.children()[1].is_reduced());
    }

    #[test]
    fn display_is_compact() {
        let tree = Expr::with_children(tags::ADDITION, vec![int(1), Expr::number_literal("2.5")]);
        assert_eq!(tree.to_string(), "Math.Arithmetic.Addition(#1, 2.5)");
    }

    #[test]
    fn child_surgery() {
        let mut tree = Expr::with_children(tags::LIST, vec![int(1), int(3)]);
        tree.add_child_at(1, int(2));
        assert_eq!(tree.child_count(), 3);
        let removed = tree.remove_child_at(0);
        assert_eq!(removed, int(1));
        assert_eq!(tree.child(0), Some(&int(2)));
    }
}
