//! Operator definitions for the operation registry
//!
//! Contains evaluation and symbolic differentiation rules for all supported
//! operators. The derivative rules compose the operands (`args`) with their
//! already-built derivatives (`diffs`) and never evaluate anything.
//!
//! Two definitions deliberately differ from their textbook namesakes:
//! - `hypot` is the sum of squares `a² + b²`, no square root.
//! - `geom-mean` takes `|∏args|^(1/n)`; its rule divides by `sign(∏args)`
//!   to match.

use super::{
    Arity, Operation, add, arith_mean, constant, div, fold, mul, negate, power, sign_of, square,
    sub,
};
use crate::{Expr, ExprKind};

/// A node with the same operator over the same operand handles.
///
/// Rules that mention the node itself use this instead of `this.clone()`,
/// so that a cached derivative never holds its own node.
fn detached(this: &Expr, args: &[Expr]) -> Expr {
    match this.kind() {
        ExprKind::Operation { op, .. } => Expr::apply_op(*op, args.to_vec()),
        _ => this.clone(),
    }
}

// ===== Internal =====

pub(crate) static SIGN: Operation = Operation {
    signs: &["sign"],
    arity: Arity::Fixed(1),
    apply: |args| if args[0] >= 0.0 { 1.0 } else { -1.0 },
    derivative: None,
};

// ===== Arithmetic =====

pub(crate) static ADD: Operation = Operation {
    signs: &["+"],
    arity: Arity::Fixed(2),
    apply: |args| args[0] + args[1],
    derivative: Some(add_rule),
};

pub(crate) static SUBTRACT: Operation = Operation {
    signs: &["-"],
    arity: Arity::Fixed(2),
    apply: |args| args[0] - args[1],
    derivative: Some(subtract_rule),
};

pub(crate) static MULTIPLY: Operation = Operation {
    signs: &["*"],
    arity: Arity::Fixed(2),
    apply: |args| args[0] * args[1],
    derivative: Some(multiply_rule),
};

pub(crate) static DIVIDE: Operation = Operation {
    signs: &["/"],
    arity: Arity::Fixed(2),
    apply: |args| args[0] / args[1],
    derivative: Some(divide_rule),
};

pub(crate) static NEGATE: Operation = Operation {
    signs: &["negate"],
    arity: Arity::Fixed(1),
    apply: |args| -args[0],
    derivative: Some(negate_rule),
};

/// Fused multiply-add `a*b + c`
pub(crate) static MULTIPLY_ADD: Operation = Operation {
    signs: &["*+", "madd"],
    arity: Arity::Fixed(3),
    apply: |args| args[0].mul_add(args[1], args[2]),
    derivative: Some(multiply_add_rule),
};

// ===== Binary means and friends =====

pub(crate) static HYPOT: Operation = Operation {
    signs: &["hypot"],
    arity: Arity::Fixed(2),
    apply: |args| args[0] * args[0] + args[1] * args[1],
    derivative: Some(hypot_rule),
};

pub(crate) static HMEAN: Operation = Operation {
    signs: &["hmean"],
    arity: Arity::Fixed(2),
    apply: |args| 2.0 / (1.0 / args[0] + 1.0 / args[1]),
    derivative: Some(hmean_rule),
};

// ===== Variadic means =====

pub(crate) static ARITH_MEAN: Operation = Operation {
    signs: &["arith-mean"],
    arity: Arity::Variadic,
    apply: |args| args.iter().sum::<f64>() / args.len() as f64,
    derivative: Some(arith_mean_rule),
};

pub(crate) static GEOM_MEAN: Operation = Operation {
    signs: &["geom-mean"],
    arity: Arity::Variadic,
    apply: |args| {
        let product: f64 = args.iter().product();
        product.abs().powf(1.0 / args.len() as f64)
    },
    derivative: Some(geom_mean_rule),
};

pub(crate) static HARM_MEAN: Operation = Operation {
    signs: &["harm-mean"],
    arity: Arity::Variadic,
    apply: |args| args.len() as f64 / args.iter().map(|a| 1.0 / a).sum::<f64>(),
    derivative: Some(harm_mean_rule),
};

// ===== Derivative rules =====

fn add_rule(_this: &Expr, _args: &[Expr], diffs: &[Expr]) -> Expr {
    add(diffs[0].clone(), diffs[1].clone())
}

fn subtract_rule(_this: &Expr, _args: &[Expr], diffs: &[Expr]) -> Expr {
    sub(diffs[0].clone(), diffs[1].clone())
}

/// (ab)' = a'b + b'a
fn multiply_rule(_this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    add(
        mul(diffs[0].clone(), args[1].clone()),
        mul(diffs[1].clone(), args[0].clone()),
    )
}

/// (a/b)' = (a'b - b'a) / b²
fn divide_rule(_this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    div(
        sub(
            mul(diffs[0].clone(), args[1].clone()),
            mul(diffs[1].clone(), args[0].clone()),
        ),
        square(&args[1]),
    )
}

fn negate_rule(_this: &Expr, _args: &[Expr], diffs: &[Expr]) -> Expr {
    negate(diffs[0].clone())
}

fn multiply_add_rule(_this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    add(
        add(
            mul(diffs[0].clone(), args[1].clone()),
            mul(args[0].clone(), diffs[1].clone()),
        ),
        diffs[2].clone(),
    )
}

/// 2(aa' + bb')
fn hypot_rule(_this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    mul(
        constant(2.0),
        add(
            mul(args[0].clone(), diffs[0].clone()),
            mul(args[1].clone(), diffs[1].clone()),
        ),
    )
}

/// (a'/a² + b'/b²) * hmean² / 2
fn hmean_rule(this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    let this = detached(this, args);
    mul(
        add(
            div(diffs[0].clone(), square(&args[0])),
            div(diffs[1].clone(), square(&args[1])),
        ),
        div(square(&this), constant(2.0)),
    )
}

fn arith_mean_rule(_this: &Expr, _args: &[Expr], diffs: &[Expr]) -> Expr {
    arith_mean(diffs.to_vec())
}

/// mean_i(x1 * .. * xi' * .. * xn) / (sign(x1 * .. * xn) * geom-mean^(n-1))
fn geom_mean_rule(this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    let this = detached(this, args);
    let n = args.len();
    let partial_products = (0..n)
        .map(|i| {
            let factors = (0..n)
                .map(|j| if j == i { diffs[j].clone() } else { args[j].clone() })
                .collect();
            fold(factors, mul)
        })
        .collect();
    div(
        arith_mean(partial_products),
        mul(sign_of(fold(args.to_vec(), mul)), power(&this, n - 1)),
    )
}

/// (x1'/x1² + .. + xn'/xn²) * harm-mean² / n
fn harm_mean_rule(this: &Expr, args: &[Expr], diffs: &[Expr]) -> Expr {
    let this = detached(this, args);
    let terms = args
        .iter()
        .zip(diffs)
        .map(|(arg, d)| div(d.clone(), square(arg)))
        .collect();
    mul(
        fold(terms, add),
        div(square(&this), constant(args.len() as f64)),
    )
}

/// Every operator, in registration order
pub(crate) static ALL: [&Operation; 12] = [
    &SIGN,
    &ADD,
    &SUBTRACT,
    &MULTIPLY,
    &DIVIDE,
    &NEGATE,
    &MULTIPLY_ADD,
    &HYPOT,
    &HMEAN,
    &ARITH_MEAN,
    &GEOM_MEAN,
    &HARM_MEAN,
];
