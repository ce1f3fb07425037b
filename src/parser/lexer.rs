use crate::Span;

/// A raw token and where it starts in the input (char offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_open(&self) -> bool {
        self.text == "("
    }

    pub fn is_close(&self) -> bool {
        self.text == ")"
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// Split input into tokens
///
/// `(` and `)` always stand alone; any other maximal run of characters that
/// are neither whitespace nor brackets is one token.
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(input.len() / 2);
    let mut chars = input.char_indices().enumerate().peekable();

    while let Some((pos, (byte, c))) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c == '(' || c == ')' {
            tokens.push(Token {
                text: &input[byte..byte + 1],
                span: Span::at(pos),
            });
            continue;
        }

        let mut end_byte = byte + c.len_utf8();
        let mut end_pos = pos + 1;
        while let Some(&(next_pos, (next_byte, next))) = chars.peek() {
            if is_delimiter(next) {
                break;
            }
            end_byte = next_byte + next.len_utf8();
            end_pos = next_pos + 1;
            chars.next();
        }

        tokens.push(Token {
            text: &input[byte..end_byte],
            span: Span::new(pos, end_pos),
        });
    }

    tokens
}

/// Numeric literal in standard floating-point syntax (`3`, `-2.5`, `1e-3`)
pub(crate) fn parse_numeral(text: &str) -> Option<f64> {
    let numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric_chars || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().filter(|v: &f64| v.is_finite())
}
