//! Expression and argument normalization.
//!
//! KScript lets authors call functions with space- or comma-separated
//! arguments (`circle x y 10`, `rect, 0, 0, w, h`). The reducer rewrites both
//! forms into a JavaScript call and decides, token by token, whether a bare
//! word is an identifier or an implicit string literal.

use crate::error::{Result, TranspileError};
use crate::keywords::KeywordSet;
use crate::split::{contains_unquoted, safe_split_by_comma, safe_split_by_space};
use crate::state::ParseState;

/// Characters that mark an argument as an expression written in host syntax.
const EXPRESSION_CHARS: &[char] = &['+', '-', '*', '/', '.', '['];

/// Binary operators that mark a space-separated value as an infix expression.
const INFIX_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "**", "<", ">", "<=", ">=", "==", "===", "!=", "!==", "&&", "||",
    "??", "&", "|", "^", "<<", ">>", "?",
];

/// Whether `s` is a single string literal delimited by matching quotes.
pub fn is_quoted(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => (first == '"' || first == '\'') && first == last,
        _ => false,
    }
}

/// Whether `s` is a JavaScript number literal, optionally signed: `10`, `-0.5`,
/// `.25`, `1.`, `1e-3`, `0xFF`, `0o17`, `0b101` or `Infinity`.
pub fn is_numeric(s: &str) -> bool {
    let body = s.strip_prefix('-').or_else(|| s.strip_prefix('+')).unwrap_or(s);
    if body == "Infinity" {
        return true;
    }

    let radix = match body.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &body[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix('-').or_else(|| exp.strip_prefix('+')).unwrap_or(exp);
        if exp.is_empty() || !all_digits(exp) {
            return false;
        }
    }

    match mantissa.split_once('.') {
        None => !mantissa.is_empty() && all_digits(mantissa),
        Some((int_part, frac)) => {
            !(int_part.is_empty() && frac.is_empty()) && all_digits(int_part) && all_digits(frac)
        }
    }
}

/// A bare JavaScript identifier: no member access, indexing or spaces.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Whether `s` is an array or object literal written in host syntax.
pub fn is_collection_literal(s: &str) -> bool {
    (s.starts_with('[') && s.ends_with(']')) || (s.starts_with('{') && s.ends_with('}'))
}

/// Wrap a bare word in double quotes.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Classifies values against the host keywords and the names declared so far.
pub struct ValueReducer<'a> {
    keywords: &'a KeywordSet,
    state: &'a ParseState,
}

impl<'a> ValueReducer<'a> {
    pub fn new(keywords: &'a KeywordSet, state: &'a ParseState) -> Self {
        Self { keywords, state }
    }

    fn is_known(&self, name: &str) -> bool {
        self.keywords.contains(name) || self.state.is_declared(name)
    }

    /// Reduce a value or bare statement to its JavaScript form.
    pub fn process(&self, value: &str) -> Result<String> {
        let value = value.trim();
        let line = self.state.current_line;

        if value.is_empty() {
            return Ok("\"\"".to_string());
        }
        if is_quoted(value) {
            return Ok(value.to_string());
        }
        if value.contains('(') && value.contains(')') {
            return Ok(value.to_string());
        }
        if is_collection_literal(value) {
            return Ok(value.to_string());
        }

        if contains_unquoted(value, ',') {
            let tokens = safe_split_by_comma(value, line)?;
            if tokens.len() > 1 {
                return self.build_call(&tokens);
            }
        }

        if value.contains(char::is_whitespace) {
            let tokens = safe_split_by_space(value, line)?;
            match tokens.len() {
                0 => return Ok("\"\"".to_string()),
                1 => return Ok(self.process_token(&tokens[0])),
                // `a + b` is an expression, not a call to `a`
                _ if INFIX_OPERATORS.contains(&tokens[1].as_str()) => return Ok(value.to_string()),
                _ => return self.build_call(&tokens),
            }
        }

        Ok(self.process_token(value))
    }

    fn process_token(&self, token: &str) -> String {
        if is_quoted(token) || is_numeric(token) || self.is_known(token) {
            return token.to_string();
        }
        if !token.contains('.') && !token.contains('[') {
            return quote_literal(token);
        }
        token.to_string()
    }

    /// Normalize one call argument.
    pub fn normalize_argument(&self, arg: &str) -> String {
        let arg = arg.trim();
        if is_quoted(arg) || is_numeric(arg) || self.is_known(arg) {
            return arg.to_string();
        }
        if !arg.contains(EXPRESSION_CHARS) {
            return quote_literal(arg);
        }
        arg.to_string()
    }

    fn build_call(&self, tokens: &[String]) -> Result<String> {
        let (callee, args) = match tokens.split_first() {
            Some((callee, args)) if !callee.trim().is_empty() => (callee.trim(), args),
            _ => {
                return Err(TranspileError::value(
                    self.state.current_line,
                    format!("missing function name before arguments `{}`", tokens.join(" ")),
                ));
            }
        };

        let args: Vec<String> = args.iter().map(|a| self.normalize_argument(a)).collect();
        Ok(format!("{}({})", callee, args.join(", ")))
    }
}
