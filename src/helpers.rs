//! Convenience helpers over the parse / evaluate / diff pipeline

use crate::parser::{Notation, Parser};
use crate::{Expr, ExprError, Var};

/// Compute the gradient `[∂f/∂x, ∂f/∂y, ∂f/∂z]`
///
/// # Example
/// ```
/// use symb_notation::{gradient, parse_prefix};
///
/// let f = parse_prefix("(hypot x y)").unwrap();
/// let [dx, dy, dz] = gradient(&f).unwrap();
/// assert_eq!(dx.evaluate(3.0, 4.0, 0.0), 6.0);
/// assert_eq!(dy.evaluate(3.0, 4.0, 0.0), 8.0);
/// assert_eq!(dz.evaluate(3.0, 4.0, 0.0), 0.0);
/// ```
pub fn gradient(expr: &Expr) -> Result<[Expr; 3], ExprError> {
    Ok([
        expr.diff(Var::X)?,
        expr.diff(Var::Y)?,
        expr.diff(Var::Z)?,
    ])
}

/// Parse `formula` in the given notation and evaluate it at `(x, y, z)`
pub fn evaluate_str(
    formula: &str,
    notation: Notation,
    x: f64,
    y: f64,
    z: f64,
) -> Result<f64, ExprError> {
    let expr = Parser::new(notation).parse(formula)?;
    Ok(expr.evaluate(x, y, z))
}

/// Parse `formula`, differentiate by the named variable and render the
/// derivative back in the same notation
pub fn diff_str(formula: &str, notation: Notation, var: &str) -> Result<String, ExprError> {
    let expr = Parser::new(notation).parse(formula)?;
    Ok(expr.diff_by_name(var)?.to_notation_string(notation))
}
