//! Parser module - converts fully-parenthesized prefix/postfix text to an `Expr`
mod descent;
mod lexer;

use std::fmt;

use crate::error::Placement;
use crate::{DEFAULT_MAX_DEPTH, Expr, ParseError};

/// Where the operator sits inside a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `(sign arg1 … argN)`
    Prefix,
    /// `(arg1 … argN sign)`
    Postfix,
}

impl Notation {
    /// The bracket a misplaced operator sign is reported as lacking
    pub(crate) fn missing_bracket(self) -> Placement {
        match self {
            Notation::Prefix => Placement::MissingOpenParen,
            Notation::Postfix => Placement::MissingCloseParen,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Prefix => write!(f, "prefix"),
            Notation::Postfix => write!(f, "postfix"),
        }
    }
}

/// Configurable parser for one notation
///
/// # Example
/// ```
/// use symb_notation::Parser;
///
/// let expr = Parser::postfix().max_depth(8).parse("((x 1 +) 2 *)").unwrap();
/// assert_eq!(expr.evaluate(1.0, 0.0, 0.0), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    notation: Notation,
    max_depth: usize,
}

impl Parser {
    pub fn new(notation: Notation) -> Self {
        Parser {
            notation,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn prefix() -> Self {
        Self::new(Notation::Prefix)
    }

    pub fn postfix() -> Self {
        Self::new(Notation::Postfix)
    }

    /// Maximum bracket nesting accepted before giving up
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// Parse `input` into an expression tree
    ///
    /// Pipeline: tokenize -> recursive descent -> trailing-token check.
    /// The first fault aborts the parse.
    ///
    /// # Errors
    /// Returns `ParseError` if:
    /// - The input holds no tokens
    /// - A bracket is empty, unclosed, or has the wrong operand count
    /// - An operator sign sits anywhere but its notation's slot
    /// - A token is neither a number, a variable nor a known sign
    /// - Tokens remain after a complete expression
    pub fn parse(&self, input: &str) -> Result<Expr, ParseError> {
        let tokens = lexer::tokenize(input);

        match descent::parse_tokens(input, &tokens, self.notation, self.max_depth) {
            Ok(expr) => {
                log::trace!("parsed {} input '{}' ({} tokens)", self.notation, input, tokens.len());
                Ok(expr)
            }
            Err(err) => {
                log::debug!(
                    "{} parse failed at offset {}: {}",
                    self.notation,
                    err.offset(),
                    err.message()
                );
                Err(err)
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::prefix()
    }
}

/// Parse prefix notation: `(+ x (* 2 y))`
///
/// # Example
/// ```
/// use symb_notation::parse_prefix;
///
/// let expr = parse_prefix("(+ x 1)").unwrap();
/// assert_eq!(expr.evaluate(2.0, 0.0, 0.0), 3.0);
/// ```
pub fn parse_prefix(input: &str) -> Result<Expr, ParseError> {
    Parser::prefix().parse(input)
}

/// Parse postfix notation: `(x (2 y *) +)`
pub fn parse_postfix(input: &str) -> Result<Expr, ParseError> {
    Parser::postfix().parse(input)
}
