//! Shell-style attribute tokenizer shared by the `[DOC ...]` and `[FIG ...]`
//! directives.

use thiserror::Error;

/// A quote was opened and never closed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unbalanced {quote} quote")]
pub struct UnbalancedQuote {
    pub quote: char,
}

/// Split `input` into whitespace-separated words.
///
/// Double quotes group text and accept `\"` and `\\` escapes; single quotes
/// group text literally. Quotes may start mid-word, so `title="A B"` yields
/// the single token `title=A B`.
pub fn tokenize(input: &str) -> Result<Vec<String>, UnbalancedQuote> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.peek() {
                            Some(&next @ ('"' | '\\')) => {
                                current.push(next);
                                chars.next();
                            }
                            _ => current.push('\\'),
                        },
                        Some(other) => current.push(other),
                        None => return Err(UnbalancedQuote { quote: '"' }),
                    }
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(UnbalancedQuote { quote: '\'' }),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Split a `key=value` token at the first `=`.
pub fn split_pair(token: &str) -> Option<(&str, &str)> {
    token.split_once('=').map(|(k, v)| (k.trim(), v))
}
