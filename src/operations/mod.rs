//! Operation descriptors: sign aliases, arity, numeric rule and derivative rule
//!
//! Every operator the parser understands is a `static Operation` in
//! [`definitions`]; [`registry::Registry`] maps sign text to them.

use std::fmt;

use crate::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

/// Operand count an operation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// One or more operands
    Variadic,
}

impl Arity {
    pub fn accepts(self, operands: usize) -> bool {
        match self {
            Arity::Fixed(n) => operands == n,
            Arity::Variadic => operands >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic => write!(f, "at least 1"),
        }
    }
}

/// Symbolic derivative rule
/// Arguments: (the node itself, its operands, the operands' derivatives)
pub(crate) type DerivativeRule = fn(&Expr, &[Expr], &[Expr]) -> Expr;

/// Definition of an operator including its evaluation and differentiation logic
pub struct Operation {
    /// Sign aliases; the first one is used when rendering
    pub(crate) signs: &'static [&'static str],

    pub(crate) arity: Arity,

    /// Numerical evaluation over already-evaluated operands
    pub(crate) apply: fn(&[f64]) -> f64,

    /// `None` for internal helper terms that cannot be differentiated
    pub(crate) derivative: Option<DerivativeRule>,
}

impl Operation {
    /// Primary sign
    pub fn sign(&self) -> &'static str {
        self.signs[0]
    }

    pub fn signs(&self) -> &'static [&'static str] {
        self.signs
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_differentiable(&self) -> bool {
        self.derivative.is_some()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("signs", &self.signs)
            .field("arity", &self.arity)
            .finish()
    }
}

// ===== Helpers for building derivative expressions =====

pub(crate) fn constant(n: f64) -> Expr {
    Expr::constant(n)
}

pub(crate) fn add(a: Expr, b: Expr) -> Expr {
    Expr::apply_op(&definitions::ADD, vec![a, b])
}

pub(crate) fn sub(a: Expr, b: Expr) -> Expr {
    Expr::apply_op(&definitions::SUBTRACT, vec![a, b])
}

pub(crate) fn mul(a: Expr, b: Expr) -> Expr {
    Expr::apply_op(&definitions::MULTIPLY, vec![a, b])
}

pub(crate) fn div(a: Expr, b: Expr) -> Expr {
    Expr::apply_op(&definitions::DIVIDE, vec![a, b])
}

pub(crate) fn negate(a: Expr) -> Expr {
    Expr::apply_op(&definitions::NEGATE, vec![a])
}

pub(crate) fn sign_of(a: Expr) -> Expr {
    Expr::apply_op(&definitions::SIGN, vec![a])
}

pub(crate) fn arith_mean(args: Vec<Expr>) -> Expr {
    Expr::apply_op(&definitions::ARITH_MEAN, args)
}

/// `a * a`, sharing the operand node
pub(crate) fn square(a: &Expr) -> Expr {
    mul(a.clone(), a.clone())
}

/// Left fold of a binary builder; a single term is returned unwrapped
pub(crate) fn fold(terms: Vec<Expr>, combine: fn(Expr, Expr) -> Expr) -> Expr {
    let mut terms = terms.into_iter();
    let first = terms.next().unwrap_or_else(|| constant(0.0));
    terms.fold(first, combine)
}

/// `a` multiplied by itself `n` times, `1` for `n == 0`
pub(crate) fn power(a: &Expr, n: usize) -> Expr {
    if n == 0 {
        return constant(1.0);
    }
    fold(vec![a.clone(); n], mul)
}
