use crate::{Arity, ParseError, ParseErrorKind, Parser, Placement, parse_postfix, parse_prefix};

fn prefix_err(input: &str) -> ParseError {
    parse_prefix(input).expect_err(input)
}

fn postfix_err(input: &str) -> ParseError {
    parse_postfix(input).expect_err(input)
}

#[test]
fn test_empty_input() {
    for input in ["", "   ", "\t\n"] {
        let err = prefix_err(input);
        assert_eq!(err.kind(), &ParseErrorKind::EmptyInput);
        assert_eq!(err.offset(), 0);
        assert_eq!(postfix_err(input).kind(), &ParseErrorKind::EmptyInput);
    }
}

#[test]
fn test_empty_bracket() {
    let err = prefix_err("()");
    assert_eq!(err.kind(), &ParseErrorKind::EmptyBracket);
    assert_eq!(err.offset(), 0);

    let err = postfix_err("(x () +)");
    assert_eq!(err.kind(), &ParseErrorKind::EmptyBracket);
    assert_eq!(err.offset(), 3);
}

#[test]
fn test_operand_arity_mismatch() {
    let err = prefix_err("(+ x)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::OperandArityMismatch {
            sign: "+",
            expected: Arity::Fixed(2),
            found: 1,
        }
    );
    assert_eq!(err.offset(), 0);

    let err = postfix_err("(x (x y z negate) +)");
    assert!(matches!(
        err.kind(),
        ParseErrorKind::OperandArityMismatch { sign: "negate", found: 3, .. }
    ));
    assert_eq!(err.offset(), 3);
}

#[test]
fn test_variadic_needs_one_operand() {
    let err = prefix_err("(arith-mean)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::OperandArityMismatch {
            sign: "arith-mean",
            expected: Arity::Variadic,
            found: 0,
        }
    );
    assert_eq!(postfix_err("(harm-mean)").offset(), 0);
}

#[test]
fn test_unclosed_bracket_points_at_last_token() {
    let err = prefix_err("(+ x 1");
    assert_eq!(err.kind(), &ParseErrorKind::UnclosedBracket);
    assert_eq!(err.offset(), 5);
    assert_eq!(
        err.to_string(),
        "Tokens are over before correct end of expression, probably missing ')'\n\"(+ x 1\"\n      ^"
    );

    assert_eq!(postfix_err("((x 1 +)").kind(), &ParseErrorKind::UnclosedBracket);
}

#[test]
fn test_redundant_trailing_symbols() {
    let err = prefix_err("(+ x 1) extra");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::RedundantTrailingSymbols {
            symbols: "extra".to_string()
        }
    );
    assert_eq!(err.offset(), 8);

    let err = prefix_err("x y z");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::RedundantTrailingSymbols {
            symbols: "y z".to_string()
        }
    );
    assert_eq!(err.offset(), 2);

    let err = prefix_err("(+ x 1))");
    assert_eq!(err.offset(), 7);
}

#[test]
fn test_prefix_operator_must_follow_open_paren() {
    let err = prefix_err("(x + 1)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen)
    );
    assert_eq!(err.offset(), 3);

    let err = prefix_err("+");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen)
    );
    assert_eq!(err.offset(), 0);
}

#[test]
fn test_postfix_operator_must_precede_close_paren() {
    let err = postfix_err("(+ x 1)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingCloseParen)
    );
    assert_eq!(err.offset(), 1);

    let err = postfix_err("(x 1 + 2)");
    assert_eq!(err.offset(), 5);

    let err = postfix_err("negate");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingCloseParen)
    );
}

#[test]
fn test_operator_slot_holding_operand() {
    let err = prefix_err("(x 1)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::OperatorExpected {
            first: true,
            found: "x".to_string(),
        })
    );
    assert_eq!(err.offset(), 0);

    let err = postfix_err("(x 1)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::OperatorExpected {
            first: false,
            found: "1".to_string(),
        })
    );

    let err = prefix_err("((+ x 1))");
    assert_eq!(
        err.message(),
        "First token in brackets must be an operation, got '(+ x 1)' instead"
    );
}

#[test]
fn test_dangling_close_paren_reported_before_parsing() {
    let err = prefix_err("x )");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen)
    );
    assert_eq!(err.offset(), 0);

    // would otherwise be an unsupported token
    let err = postfix_err("w x +)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::InvalidOperatorPlacement(Placement::MissingOpenParen)
    );
}

#[test]
fn test_unsupported_token() {
    let err = prefix_err("(+ x w)");
    assert_eq!(
        err.kind(),
        &ParseErrorKind::UnsupportedToken {
            token: "w".to_string()
        }
    );
    assert_eq!(err.offset(), 5);

    for bad in ["inf", "NaN", "1-2", "X", "hypotenuse", "1e400"] {
        let err = prefix_err(&format!("(negate {})", bad));
        assert_eq!(err.offset(), 8, "{}", bad);
        assert!(matches!(err.kind(), ParseErrorKind::UnsupportedToken { .. }), "{}", bad);
    }
}

#[test]
fn test_offsets_count_chars_not_bytes() {
    let err = prefix_err("(+ é 1)");
    assert_eq!(err.offset(), 3);
    assert_eq!(err.caret_line(), "    ^");
}

#[test]
fn test_nesting_limit() {
    let parser = Parser::prefix().max_depth(2);
    assert!(parser.parse("(negate (negate x))").is_ok());

    let err = parser.parse("(negate (negate (negate x)))").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::NestingTooDeep { limit: 2 });
    assert_eq!(err.offset(), 16);
}

#[test]
fn test_error_exposes_input_and_message_separately() {
    let err = prefix_err("(+ x)");
    assert_eq!(err.input(), "(+ x)");
    assert_eq!(err.message(), "Number of arguments (1) doesn't match arity of '+' (2)");
    assert_eq!(
        err.to_string(),
        format!("{}\n\"(+ x)\"\n ^", err.message())
    );
}
