//! Expression tree: constants, the three variables, and operation nodes

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::error::ExprError;
use crate::operations::{Operation, registry::Registry};

/// Global counter for expression IDs
static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

#[cfg(test)]
thread_local! {
    /// Nodes created by the current thread
    static NODES_BUILT: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[cfg(test)]
pub(crate) fn nodes_built() -> usize {
    NODES_BUILT.with(std::cell::Cell::get)
}

fn next_id() -> u64 {
    #[cfg(test)]
    NODES_BUILT.with(|n| n.set(n.get() + 1));
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The fixed variable set, bound positionally to `evaluate(x, y, z)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    X,
    Y,
    Z,
}

impl Var {
    pub const ALL: [Var; 3] = [Var::X, Var::Y, Var::Z];

    /// Position in the `(x, y, z)` binding triple
    pub fn index(self) -> usize {
        match self {
            Var::X => 0,
            Var::Y => 1,
            Var::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Var::X => "x",
            Var::Y => "y",
            Var::Z => "z",
        }
    }
}

impl FromStr for Var {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Var::X),
            "y" => Ok(Var::Y),
            "z" => Ok(Var::Z),
            other => Err(ExprError::unbound(other)),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-node derivative memo, one slot per variable
#[derive(Default)]
pub(crate) struct DiffCache {
    slots: [OnceLock<Expr>; 3],
}

impl DiffCache {
    pub(crate) fn get(&self, var: Var) -> Option<&Expr> {
        self.slots[var.index()].get()
    }

    /// Store a freshly built derivative; if another caller won the race,
    /// their tree is kept and returned
    pub(crate) fn insert(&self, var: Var, derivative: Expr) -> &Expr {
        self.slots[var.index()].get_or_init(|| derivative)
    }

    pub(crate) fn is_cached(&self, var: Var) -> bool {
        self.get(var).is_some()
    }
}

#[derive(Clone)]
pub enum ExprKind {
    /// Numeric literal (e.g. `3`, `-2.5`, `1e10`)
    Constant(f64),

    /// One of `x`, `y`, `z`
    Variable(Var),

    /// Operator applied to its operands
    Operation {
        op: &'static Operation,
        args: Vec<Expr>,
    },
}

// Structural equality; operations compare by descriptor identity
impl PartialEq for ExprKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
            (ExprKind::Variable(a), ExprKind::Variable(b)) => a == b,
            (
                ExprKind::Operation { op: a, args: xs },
                ExprKind::Operation { op: b, args: ys },
            ) => std::ptr::eq(*a, *b) && xs == ys,
            _ => false,
        }
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Constant(n) => f.debug_tuple("Constant").field(n).finish(),
            ExprKind::Variable(v) => f.debug_tuple("Variable").field(v).finish(),
            ExprKind::Operation { op, args } => f
                .debug_struct("Operation")
                .field("sign", &op.sign())
                .field("args", args)
                .finish(),
        }
    }
}

struct Node {
    id: u64,
    kind: ExprKind,
    derivatives: DiffCache,
}

/// Immutable expression handle
///
/// Cloning is cheap and yields the same node instance, sharing its
/// derivative cache. Use [`Expr::ptr_eq`] to test instance identity;
/// `==` compares structure only.
#[derive(Clone)]
pub struct Expr {
    node: Arc<Node>,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.node.kind
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Expr::ptr_eq(self, other) || self.node.kind == other.node.kind
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("id", &self.node.id)
            .field("kind", &self.node.kind)
            .finish()
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            node: Arc::new(Node {
                id: next_id(),
                kind,
                derivatives: DiffCache::default(),
            }),
        }
    }

    /// Unique ID of this node instance (not used in equality comparisons)
    pub fn id(&self) -> u64 {
        self.node.id
    }

    pub fn kind(&self) -> &ExprKind {
        &self.node.kind
    }

    /// True when both handles point at the very same node
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    pub(crate) fn derivatives(&self) -> &DiffCache {
        &self.node.derivatives
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self.kind() {
            ExprKind::Constant(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<Var> {
        match self.kind() {
            ExprKind::Variable(v) => Some(*v),
            _ => None,
        }
    }

    /// Operand list of an operation node, empty for leaves
    pub fn args(&self) -> &[Expr] {
        match self.kind() {
            ExprKind::Operation { args, .. } => args,
            _ => &[],
        }
    }

    /// Primary sign of an operation node
    pub fn sign(&self) -> Option<&'static str> {
        match self.kind() {
            ExprKind::Operation { op, .. } => Some(op.sign()),
            _ => None,
        }
    }

    // Convenience constructors

    pub fn constant(n: f64) -> Self {
        Expr::new(ExprKind::Constant(n))
    }

    pub fn variable(var: Var) -> Self {
        Expr::new(ExprKind::Variable(var))
    }

    /// Build an operation node from a sign, checking that the sign is known
    /// and that the operand count fits its arity
    ///
    /// # Example
    /// ```
    /// use symb_notation::{Expr, Var};
    ///
    /// let sum = Expr::operation("+", vec![Expr::variable(Var::X), Expr::constant(1.0)]).unwrap();
    /// assert_eq!(sum.evaluate(2.0, 0.0, 0.0), 3.0);
    /// ```
    pub fn operation(sign: &str, args: Vec<Expr>) -> Option<Self> {
        let op = Registry::get(sign)?;
        op.arity
            .accepts(args.len())
            .then(|| Expr::apply_op(op, args))
    }

    /// Build an operation node from a resolved descriptor
    pub(crate) fn apply_op(op: &'static Operation, args: Vec<Expr>) -> Self {
        debug_assert!(
            op.arity.accepts(args.len()),
            "'{}' built with {} operands",
            op.sign(),
            args.len()
        );
        Expr::new(ExprKind::Operation { op, args })
    }

    /// Evaluate with `x`, `y`, `z` bound positionally
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.eval_at(&[x, y, z])
    }

    fn eval_at(&self, vars: &[f64; 3]) -> f64 {
        match self.kind() {
            ExprKind::Constant(n) => *n,
            ExprKind::Variable(v) => vars[v.index()],
            ExprKind::Operation { op, args } => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval_at(vars)).collect();
                (op.apply)(&values)
            }
        }
    }

    /// Evaluate against named bindings
    ///
    /// Fails with `UnboundVariable` if the tree reads a variable that has no
    /// entry in `vars`.
    pub fn evaluate_with(&self, vars: &FxHashMap<&str, f64>) -> Result<f64, ExprError> {
        match self.kind() {
            ExprKind::Constant(n) => Ok(*n),
            ExprKind::Variable(v) => vars
                .get(v.name())
                .copied()
                .ok_or_else(|| ExprError::unbound(v.name())),
            ExprKind::Operation { op, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate_with(vars))
                    .collect::<Result<Vec<f64>, _>>()?;
                Ok((op.apply)(&values))
            }
        }
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Expr::variable(var)
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::constant(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::variable(Var::X)
    }

    #[test]
    fn test_var_round_trips_through_names() {
        for var in Var::ALL {
            assert_eq!(var.name().parse::<Var>().unwrap(), var);
        }
        assert!(matches!(
            "w".parse::<Var>(),
            Err(ExprError::UnboundVariable { name }) if name == "w"
        ));
    }

    #[test]
    fn test_operation_constructor_checks_arity() {
        assert!(Expr::operation("+", vec![x()]).is_none());
        assert!(Expr::operation("nope", vec![x(), x()]).is_none());
        assert!(Expr::operation("arith-mean", vec![]).is_none());
        assert!(Expr::operation("arith-mean", vec![x(), x(), x(), x()]).is_some());
    }

    #[test]
    fn test_structural_equality_ignores_identity() {
        let a = Expr::operation("*", vec![x(), Expr::constant(2.0)]).unwrap();
        let b = Expr::operation("*", vec![x(), Expr::constant(2.0)]).unwrap();
        assert_eq!(a, b);
        assert!(!Expr::ptr_eq(&a, &b));
        assert_ne!(a.id(), b.id());

        let c = a.clone();
        assert!(Expr::ptr_eq(&a, &c));
        assert_eq!(a.id(), c.id());
    }

    #[test]
    fn test_evaluate_with_named_bindings() {
        let e = Expr::operation("-", vec![x(), Expr::variable(Var::Z)]).unwrap();
        let mut vars = FxHashMap::default();
        vars.insert("x", 5.0);
        assert_eq!(e.evaluate_with(&vars), Err(ExprError::unbound("z")));
        vars.insert("z", 1.5);
        assert_eq!(e.evaluate_with(&vars), Ok(3.5));
    }
}
