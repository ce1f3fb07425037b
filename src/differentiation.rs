//! Differentiation engine - applies the per-operation calculus rules
//!
//! Derivatives are purely structural: each rule composes the operands with
//! their derivatives, nothing is evaluated and nothing is simplified.
//! Operation nodes memoise their derivative per variable, so asking the same
//! node twice hands back the very same tree.

use crate::{Expr, ExprError, ExprKind, Var};

impl Expr {
    /// Differentiate this expression with respect to `var`
    ///
    /// # Errors
    /// `UnsupportedDifferentiation` if the tree contains an internal-only
    /// operation such as `sign`.
    ///
    /// # Example
    /// ```
    /// use symb_notation::{parse_prefix, Var};
    ///
    /// let expr = parse_prefix("(* x x)").unwrap();
    /// let derivative = expr.diff(Var::X).unwrap();
    /// assert_eq!(derivative.evaluate(3.0, 0.0, 0.0), 6.0);
    /// ```
    pub fn diff(&self, var: Var) -> Result<Expr, ExprError> {
        match self.kind() {
            ExprKind::Constant(_) => Ok(Expr::constant(0.0)),

            ExprKind::Variable(v) => Ok(Expr::constant(if *v == var { 1.0 } else { 0.0 })),

            ExprKind::Operation { op, args } => {
                let cache = self.derivatives();
                if let Some(cached) = cache.get(var) {
                    log::trace!("diff cache hit: node {} by {}", self.id(), var);
                    return Ok(cached.clone());
                }

                let rule = op
                    .derivative
                    .ok_or(ExprError::UnsupportedDifferentiation { sign: op.sign() })?;

                let diffs = args
                    .iter()
                    .map(|arg| arg.diff(var))
                    .collect::<Result<Vec<Expr>, _>>()?;

                log::trace!("diff cache miss: node {} ('{}') by {}", self.id(), op.sign(), var);
                Ok(cache.insert(var, rule(self, args, &diffs)).clone())
            }
        }
    }

    /// Differentiate by variable name
    ///
    /// # Errors
    /// `UnboundVariable` for names outside `x`, `y`, `z`, plus everything
    /// [`Expr::diff`] reports.
    pub fn diff_by_name(&self, name: &str) -> Result<Expr, ExprError> {
        self.diff(name.parse()?)
    }

    /// Whether this node already holds a derivative by `var`
    pub fn is_diff_cached(&self, var: Var) -> bool {
        self.derivatives().is_cached(var)
    }
}
