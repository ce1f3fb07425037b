//! Expression visitor pattern for tree traversal
//!
//! Provides a clean interface for walking the expression tree without
//! manually handling the recursive structure.

use crate::operations::Operation;
use crate::{Expr, ExprKind, Var};

/// Trait for visiting expression nodes
///
/// Each method returns a boolean indicating whether to continue visiting
/// children (only meaningful for operations).
///
/// # Example
/// ```
/// use symb_notation::{parse_prefix, visitor::{ExprVisitor, walk_expr}, Var, Operation, Expr};
///
/// struct VarCounter { count: usize }
///
/// impl ExprVisitor for VarCounter {
///     fn visit_constant(&mut self, _n: f64) -> bool { true }
///     fn visit_variable(&mut self, _v: Var) -> bool { self.count += 1; true }
///     fn visit_operation(&mut self, _op: &Operation, _args: &[Expr]) -> bool { true }
/// }
///
/// let expr = parse_prefix("(arith-mean x y (* x 2))").unwrap();
/// let mut counter = VarCounter { count: 0 };
/// walk_expr(&expr, &mut counter);
/// assert_eq!(counter.count, 3);
/// ```
pub trait ExprVisitor {
    /// Visit a numeric literal
    fn visit_constant(&mut self, n: f64) -> bool;

    /// Visit a variable
    fn visit_variable(&mut self, var: Var) -> bool;

    /// Visit an operation node, returns true to visit operands
    fn visit_operation(&mut self, op: &Operation, args: &[Expr]) -> bool;
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children).
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    match expr.kind() {
        ExprKind::Constant(n) => {
            visitor.visit_constant(*n);
        }
        ExprKind::Variable(v) => {
            visitor.visit_variable(*v);
        }
        ExprKind::Operation { op, args } => {
            if visitor.visit_operation(op, args) {
                for arg in args {
                    walk_expr(arg, visitor);
                }
            }
        }
    }
}

struct NodeCounter {
    count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_constant(&mut self, _n: f64) -> bool {
        self.count += 1;
        true
    }

    fn visit_variable(&mut self, _var: Var) -> bool {
        self.count += 1;
        true
    }

    fn visit_operation(&mut self, _op: &Operation, _args: &[Expr]) -> bool {
        self.count += 1;
        true
    }
}

struct VariableCollector {
    seen: [bool; 3],
}

impl ExprVisitor for VariableCollector {
    fn visit_constant(&mut self, _n: f64) -> bool {
        true
    }

    fn visit_variable(&mut self, var: Var) -> bool {
        self.seen[var.index()] = true;
        true
    }

    fn visit_operation(&mut self, _op: &Operation, _args: &[Expr]) -> bool {
        true
    }
}

impl Expr {
    /// Total number of nodes, counting shared subtrees once per occurrence
    pub fn node_count(&self) -> usize {
        let mut counter = NodeCounter { count: 0 };
        walk_expr(self, &mut counter);
        counter.count
    }

    /// Longest root-to-leaf path; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.args().iter().map(Expr::depth).max().unwrap_or(0)
    }

    /// Variables that occur in the tree, in `x, y, z` order
    pub fn variables(&self) -> Vec<Var> {
        let mut collector = VariableCollector { seen: [false; 3] };
        walk_expr(self, &mut collector);
        Var::ALL
            .into_iter()
            .filter(|v| collector.seen[v.index()])
            .collect()
    }
}
