//! Text rendering: prefix, postfix and the flat debug dump

use std::fmt::{self, Write};

use crate::parser::Notation;
use crate::{Expr, ExprKind};

fn write_leaf(f: &mut impl Write, kind: &ExprKind) -> fmt::Result {
    match kind {
        ExprKind::Constant(n) => write!(f, "{}", n),
        ExprKind::Variable(v) => write!(f, "{}", v),
        ExprKind::Operation { .. } => Ok(()),
    }
}

/// Fully parenthesized form, operator first or last
fn write_notation(f: &mut impl Write, expr: &Expr, notation: Notation) -> fmt::Result {
    let ExprKind::Operation { op, args } = expr.kind() else {
        return write_leaf(f, expr.kind());
    };

    f.write_char('(')?;
    if notation == Notation::Prefix {
        f.write_str(op.sign())?;
    }
    for (i, arg) in args.iter().enumerate() {
        if i > 0 || notation == Notation::Prefix {
            f.write_char(' ')?;
        }
        write_notation(f, arg, notation)?;
    }
    if notation == Notation::Postfix {
        write!(f, " {}", op.sign())?;
    }
    f.write_char(')')
}

/// Operands then sign, space separated, no brackets
fn write_debug(f: &mut impl Write, expr: &Expr) -> fmt::Result {
    let ExprKind::Operation { op, args } = expr.kind() else {
        return write_leaf(f, expr.kind());
    };

    for arg in args {
        write_debug(f, arg)?;
        f.write_char(' ')?;
    }
    f.write_str(op.sign())
}

impl Expr {
    /// `(sign arg1 … argN)`
    pub fn to_prefix_string(&self) -> String {
        self.to_notation_string(Notation::Prefix)
    }

    /// `(arg1 … argN sign)`
    pub fn to_postfix_string(&self) -> String {
        self.to_notation_string(Notation::Postfix)
    }

    /// Flat dump used for diagnostics; the same text `Display` produces
    pub fn to_debug_string(&self) -> String {
        self.to_string()
    }

    pub fn to_notation_string(&self, notation: Notation) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = write_notation(&mut out, self, notation);
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(f, self)
    }
}
