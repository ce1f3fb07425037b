use super::Notation;
use super::lexer::{Token, parse_numeral};
use crate::error::{ParseError, ParseErrorKind, Placement};
use crate::operations::{Operation, registry::Registry};
use crate::{Expr, Span, Var};

/// One parsed item inside (or outside) a bracket
enum Element {
    Expr(Expr),
    /// A bare operator sign, waiting for its bracket to be closed
    Operator(&'static Operation),
}

/// Parser state: the token table and a single forward cursor
struct Descent<'a> {
    input: &'a str,
    tokens: &'a [Token<'a>],
    /// Index of the next unread token
    pos: usize,
    notation: Notation,
    max_depth: usize,
}

/// Build an expression from a token table, rejecting any malformed input
pub(crate) fn parse_tokens(
    input: &str,
    tokens: &[Token<'_>],
    notation: Notation,
    max_depth: usize,
) -> Result<Expr, ParseError> {
    let Some(last) = tokens.last() else {
        return Err(ParseError::new(ParseErrorKind::EmptyInput, input, Span::at(0)));
    };

    let mut parser = Descent {
        input,
        tokens,
        pos: 0,
        notation,
        max_depth,
    };

    let (index, first) = parser.next_token()?;
    if !first.is_open() && last.is_close() {
        return Err(parser.error(
            ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen),
            index,
        ));
    }

    let expr = match parser.parse_element(index, first, 0)? {
        Some(Element::Expr(expr)) => expr,
        Some(Element::Operator(_)) => {
            return Err(parser.error(
                ParseErrorKind::InvalidOperatorPlacement(notation.missing_bracket()),
                index,
            ));
        }
        None => {
            return Err(parser.error(
                ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen),
                index,
            ));
        }
    };

    if parser.pos < tokens.len() {
        let symbols = tokens[parser.pos..]
            .iter()
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" ");
        return Err(parser.error(
            ParseErrorKind::RedundantTrailingSymbols { symbols },
            parser.pos,
        ));
    }

    Ok(expr)
}

impl<'a> Descent<'a> {
    fn error(&self, kind: ParseErrorKind, index: usize) -> ParseError {
        let span = self
            .tokens
            .get(index)
            .map_or_else(|| Span::at(0), |t| t.span);
        ParseError::new(kind, self.input, span)
    }

    /// Consume the next token; running out means a bracket was never closed
    fn next_token(&mut self) -> Result<(usize, &'a Token<'a>), ParseError> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok((self.pos - 1, token))
            }
            None => Err(self.error(
                ParseErrorKind::UnclosedBracket,
                tokens.len().saturating_sub(1),
            )),
        }
    }

    /// Parse the element starting at token `index`; `None` marks a `)`
    fn parse_element(
        &mut self,
        index: usize,
        token: &Token<'_>,
        depth: usize,
    ) -> Result<Option<Element>, ParseError> {
        if token.is_open() {
            return self.parse_bracket(index, depth + 1).map(|e| Some(Element::Expr(e)));
        }
        if token.is_close() {
            return Ok(None);
        }
        if let Ok(var) = token.text.parse::<Var>() {
            return Ok(Some(Element::Expr(Expr::variable(var))));
        }
        if let Some(value) = parse_numeral(token.text) {
            return Ok(Some(Element::Expr(Expr::constant(value))));
        }
        if let Some(op) = Registry::get(token.text) {
            self.check_operator_placement(index)?;
            return Ok(Some(Element::Operator(op)));
        }

        Err(self.error(
            ParseErrorKind::UnsupportedToken {
                token: token.text.to_string(),
            },
            index,
        ))
    }

    /// Prefix signs must directly follow `(`, postfix signs directly precede `)`
    fn check_operator_placement(&self, index: usize) -> Result<(), ParseError> {
        let well_placed = match self.notation {
            Notation::Prefix => index
                .checked_sub(1)
                .and_then(|prev| self.tokens.get(prev))
                .is_some_and(Token::is_open),
            Notation::Postfix => self.tokens.get(index + 1).is_some_and(Token::is_close),
        };

        if well_placed {
            Ok(())
        } else {
            Err(self.error(
                ParseErrorKind::InvalidOperatorPlacement(self.notation.missing_bracket()),
                index,
            ))
        }
    }

    /// Parse a bracket whose `(` sits at token `open`
    fn parse_bracket(&mut self, open: usize, depth: usize) -> Result<Expr, ParseError> {
        if depth > self.max_depth {
            return Err(self.error(
                ParseErrorKind::NestingTooDeep {
                    limit: self.max_depth,
                },
                open,
            ));
        }

        let mut content = Vec::new();
        loop {
            let (index, token) = self.next_token()?;
            match self.parse_element(index, token, depth)? {
                Some(element) => content.push(element),
                None => break,
            }
        }

        let operator = match self.notation {
            Notation::Prefix if !content.is_empty() => Some(content.remove(0)),
            Notation::Prefix => None,
            Notation::Postfix => content.pop(),
        };
        let Some(operator) = operator else {
            return Err(self.error(ParseErrorKind::EmptyBracket, open));
        };
        let op = match operator {
            Element::Operator(op) => op,
            Element::Expr(found) => {
                return Err(self.error(
                    ParseErrorKind::InvalidOperatorPlacement(Placement::OperatorExpected {
                        first: self.notation == Notation::Prefix,
                        found: found.to_notation_string(self.notation),
                    }),
                    open,
                ));
            }
        };

        let operands = content
            .into_iter()
            .map(|element| match element {
                Element::Expr(expr) => Ok(expr),
                Element::Operator(_) => Err(self.error(
                    ParseErrorKind::InvalidOperatorPlacement(self.notation.missing_bracket()),
                    open,
                )),
            })
            .collect::<Result<Vec<Expr>, _>>()?;

        if !op.arity().accepts(operands.len()) {
            return Err(self.error(
                ParseErrorKind::OperandArityMismatch {
                    sign: op.sign(),
                    expected: op.arity(),
                    found: operands.len(),
                },
                open,
            ));
        }

        Ok(Expr::apply_op(op, operands))
    }
}
