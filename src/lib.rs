//! Symbolic Expression Toolkit
//!
//! A small library for fully-parenthesized prefix and postfix arithmetic
//! expressions: parse them into a tree, evaluate against `x`, `y`, `z`,
//! differentiate symbolically and render back to text.
//!
//! # Features
//! - Dual-mode parser with strict grammar validation and caret-pointed errors
//! - Memoised symbolic differentiation, including n-ary means
//! - Prefix, postfix and flat debug rendering
//! - Optional Rayon batch evaluation (`parallel` feature)
//!
//! # Usage Examples
//!
//! ```
//! use symb_notation::{parse_prefix, parse_postfix, Var};
//!
//! let f = parse_prefix("(arith-mean x y z)").unwrap();
//! assert_eq!(f.evaluate(2.0, 4.0, 6.0), 4.0);
//!
//! let df = f.diff(Var::X).unwrap();
//! assert!((df.evaluate(0.0, 0.0, 0.0) - 1.0 / 3.0).abs() < 1e-12);
//!
//! let g = parse_postfix(&f.to_postfix_string()).unwrap();
//! assert_eq!(f, g);
//! ```
//!
//! ## Error reporting
//! ```
//! use symb_notation::parse_prefix;
//!
//! let err = parse_prefix("(+ x 1) extra").unwrap_err();
//! assert_eq!(err.offset(), 8);
//! println!("{}", err);
//! // Redundant symbols after correct expression: 'extra'
//! // "(+ x 1) extra"
//! //          ^
//! ```

mod ast;
mod differentiation;
mod display;
mod error;
mod helpers;
pub mod operations;
mod parser;
pub mod visitor;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{Expr, ExprKind, Var};
pub use error::{ExprError, ParseError, ParseErrorKind, Placement, Span};
pub use helpers::{diff_str, evaluate_str, gradient};
pub use operations::{Arity, Operation};
pub use parser::{Notation, Parser, parse_postfix, parse_prefix};

/// Default maximum bracket nesting accepted by the parser
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Every operator sign the parser recognises, aliases included, sorted
pub fn supported_signs() -> Vec<&'static str> {
    let mut signs: Vec<&'static str> = operations::registry::Registry::signs().collect();
    signs.sort_unstable();
    signs
}
