//! Parallel batch evaluation using Rayon
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_notation = { version = "0.1", features = ["parallel"] }
//! ```

use crate::Expr;
use rayon::prelude::*;

/// Evaluate one expression at many `[x, y, z]` points in parallel
///
/// Results are returned in the same order as `points`.
///
/// # Example
/// ```ignore
/// use symb_notation::{parse_prefix, parallel::evaluate_parallel};
///
/// let f = parse_prefix("(+ x y)").unwrap();
/// let out = evaluate_parallel(&f, &[[1.0, 2.0, 0.0], [3.0, 4.0, 0.0]]);
/// assert_eq!(out, vec![3.0, 7.0]);
/// ```
pub fn evaluate_parallel(expr: &Expr, points: &[[f64; 3]]) -> Vec<f64> {
    points
        .par_iter()
        .map(|[x, y, z]| expr.evaluate(*x, *y, *z))
        .collect()
}

/// Evaluate several expressions at the same points; `out[i][j]` is
/// expression `i` at point `j`
pub fn evaluate_many_parallel(exprs: &[Expr], points: &[[f64; 3]]) -> Vec<Vec<f64>> {
    exprs
        .par_iter()
        .map(|expr| evaluate_parallel(expr, points))
        .collect()
}
