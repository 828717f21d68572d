//! Quote-aware splitting of KScript statements and argument lists.
//!
//! Delimiters only count when they appear outside a string literal. A quote
//! character opens a literal, and only the same quote character closes it; a
//! backslash escapes the character that follows it.

use crate::error::{Result, TranspileError};

/// Tracks whether the scan position is inside a string literal.
#[derive(Debug, Default)]
struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns `true` when the character is structural,
    /// i.e. outside any literal and not itself a quote or escape.
    fn feed(&mut self, ch: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match ch {
            '\\' => {
                self.escaped = true;
                false
            }
            '"' | '\'' => {
                match self.quote {
                    None => self.quote = Some(ch),
                    Some(open) if open == ch => self.quote = None,
                    Some(_) => {}
                }
                false
            }
            _ => self.quote.is_none(),
        }
    }

    fn in_quotes(&self) -> bool {
        self.quote.is_some()
    }
}

fn split_on(
    input: &str,
    is_delimiter: impl Fn(char) -> bool,
    keep_empty: bool,
    line: usize,
) -> Result<Vec<String>> {
    let mut state = QuoteState::default();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in input.chars() {
        if state.feed(ch) && is_delimiter(ch) {
            let token = std::mem::take(&mut current);
            if keep_empty || !token.is_empty() {
                tokens.push(token);
            }
        } else {
            current.push(ch);
        }
    }

    if state.in_quotes() {
        return Err(TranspileError::split(
            line,
            format!("unterminated string literal in `{}`", input),
        ));
    }

    if keep_empty || !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Split on commas outside string literals. Tokens are trimmed; empty tokens
/// between consecutive commas are kept.
pub fn safe_split_by_comma(input: &str, line: usize) -> Result<Vec<String>> {
    let tokens = split_on(input, |ch| ch == ',', true, line)?;
    Ok(tokens.into_iter().map(|t| t.trim().to_string()).collect())
}

/// Split on whitespace outside string literals. Runs of whitespace collapse.
pub fn safe_split_by_space(input: &str, line: usize) -> Result<Vec<String>> {
    split_on(input, char::is_whitespace, false, line)
}

/// Split a source line into statements on `;` outside string literals.
/// Empty statements are kept so callers can tell a trailing `;` apart.
pub fn safe_split_statements(input: &str, line: usize) -> Result<Vec<String>> {
    split_on(input, |ch| ch == ';', true, line)
}

/// Byte offsets and characters that sit outside string literals.
pub(crate) fn unquoted_chars(input: &str) -> Vec<(usize, char)> {
    let mut state = QuoteState::default();
    input
        .char_indices()
        .filter(|&(_, ch)| state.feed(ch))
        .collect()
}

/// Whether `ch` occurs anywhere outside a string literal.
pub(crate) fn contains_unquoted(input: &str, ch: char) -> bool {
    unquoted_chars(input).iter().any(|&(_, c)| c == ch)
}
