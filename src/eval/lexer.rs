//! Tokenizer for expression text.

use super::EvalError;

/// A lexical token kind.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// A numeric literal, already parsed.
    Number(f64),
    /// An identifier: variable, constant or function name.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Comma,
    LParen,
    RParen,
}

/// A token with its byte offset in the source text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: usize,
}

/// Tokenize an expression.
///
/// Accepts numbers, identifiers, `+ - * / ^`, commas and parentheses.
/// Whitespace separates tokens and is otherwise ignored.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_ascii_whitespace() {
            chars.next();
            continue;
        }

        let single = match ch {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        };
        if let Some(kind) = single {
            chars.next();
            tokens.push(Token { kind, pos });
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let mut text = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = text.parse::<f64>().map_err(|_| EvalError::InvalidNumber {
                text: text.clone(),
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
            });
            continue;
        }

        if ch.is_ascii_alphabetic() {
            let mut name = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(name),
                pos,
            });
            continue;
        }

        return Err(EvalError::InvalidChar { ch, pos });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_numbers_and_operators() {
        assert_eq!(
            kinds("1.5 + 2"),
            vec![
                TokenKind::Number(1.5),
                TokenKind::Plus,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn lexes_function_call() {
        assert_eq!(
            kinds("sin(x)"),
            vec![
                TokenKind::Ident("sin".to_string()),
                TokenKind::LParen,
                TokenKind::Ident("x".to_string()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn rejects_invalid_character() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert!(matches!(err, EvalError::InvalidChar { ch: '$', pos: 2 }));
    }

    #[test]
    fn rejects_malformed_number() {
        let err = tokenize("1.2.3").unwrap_err();
        assert!(matches!(err, EvalError::InvalidNumber { .. }));
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(kinds("  2*x "), kinds("2 * x"));
    }
}
