use std::fmt;

use crate::operations::Arity;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed char offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed char offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Length of the span in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which placement rule a bare operator sign broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Prefix mode: operator not directly after `(`
    MissingOpenParen,
    /// Postfix mode: operator not directly before `)`
    MissingCloseParen,
    /// The operator slot of a bracket holds an operand
    OperatorExpected { first: bool, found: String },
}

/// Everything that can go wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    UnclosedBracket,
    EmptyBracket,
    OperandArityMismatch {
        sign: &'static str,
        expected: Arity,
        found: usize,
    },
    InvalidOperatorPlacement(Placement),
    UnsupportedToken {
        token: String,
    },
    RedundantTrailingSymbols {
        symbols: String,
    },
    NestingTooDeep {
        limit: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyInput => write!(f, "Empty input"),
            ParseErrorKind::UnclosedBracket => write!(
                f,
                "Tokens are over before correct end of expression, probably missing ')'"
            ),
            ParseErrorKind::EmptyBracket => write!(f, "Empty brackets"),
            ParseErrorKind::OperandArityMismatch {
                sign,
                expected,
                found,
            } => write!(
                f,
                "Number of arguments ({}) doesn't match arity of '{}' ({})",
                found, sign, expected
            ),
            ParseErrorKind::InvalidOperatorPlacement(placement) => match placement {
                Placement::MissingOpenParen => write!(f, "Missing '('"),
                Placement::MissingCloseParen => write!(f, "Missing ')'"),
                Placement::OperatorExpected { first, found } => write!(
                    f,
                    "{} token in brackets must be an operation, got '{}' instead",
                    if *first { "First" } else { "Last" },
                    found
                ),
            },
            ParseErrorKind::UnsupportedToken { token } => {
                write!(f, "Unsupported token: '{}'", token)
            }
            ParseErrorKind::RedundantTrailingSymbols { symbols } => {
                write!(f, "Redundant symbols after correct expression: '{}'", symbols)
            }
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "Brackets nested deeper than the limit of {}", limit)
            }
        }
    }
}

/// A parse failure, carrying the input text and the location of the fault
///
/// `Display` renders the message, the quoted input and a caret line:
/// ```text
/// Empty brackets
/// "(+ () 1)"
///     ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
    span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, input: impl Into<String>, span: Span) -> Self {
        ParseError {
            kind,
            input: input.into(),
            span,
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The bare message, without input text or caret
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Char offset of the fault in the input
    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The caret line alone, aligned under the quoted input
    pub fn caret_line(&self) -> String {
        format!("{}^", " ".repeat(self.span.start + 1))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\"{}\"\n{}",
            self.kind,
            self.input,
            self.caret_line()
        )
    }
}

impl std::error::Error for ParseError {}

/// Errors from the expression API as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    Parse(ParseError),
    UnboundVariable { name: String },
    UnsupportedDifferentiation { sign: &'static str },
}

impl ExprError {
    pub fn unbound(name: impl Into<String>) -> Self {
        ExprError::UnboundVariable { name: name.into() }
    }
}

impl From<ParseError> for ExprError {
    fn from(err: ParseError) -> Self {
        ExprError::Parse(err)
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(err) => write!(f, "{}", err),
            ExprError::UnboundVariable { name } => {
                write!(f, "Variable '{}' has no bound value", name)
            }
            ExprError::UnsupportedDifferentiation { sign } => {
                write!(f, "Operation '{}' cannot be differentiated", sign)
            }
        }
    }
}

impl std::error::Error for ExprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExprError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_points_under_offset() {
        let err = ParseError::new(ParseErrorKind::EmptyBracket, "(+ () 1)", Span::at(3));
        assert_eq!(err.offset(), 3);
        assert_eq!(err.message(), "Empty brackets");
        assert_eq!(err.to_string(), "Empty brackets\n\"(+ () 1)\"\n    ^");
    }

    #[test]
    fn test_expr_error_wraps_parse_error() {
        let err = ParseError::new(ParseErrorKind::EmptyInput, "", Span::at(0));
        let wrapped: ExprError = err.clone().into();
        assert_eq!(wrapped, ExprError::Parse(err));
        assert!(std::error::Error::source(&wrapped).is_some());
    }
}
