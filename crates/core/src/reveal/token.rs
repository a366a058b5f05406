//! Splits text into atomic markdown spans and single characters.

use serde::Serialize;

const CODE: &str = "`";
const BOLD: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A complete `` `code` `` or `**bold**` run, delimiters included.
    Span,
    /// One character.
    Char,
}

/// A slice of the source that is revealed as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn span(text: &'a str) -> Self {
        Self { kind: TokenKind::Span, text }
    }

    fn char(text: &'a str) -> Self {
        Self { kind: TokenKind::Char, text }
    }
}

/// Tokenize `text` in a single left-to-right scan.
///
/// An opening delimiter with no closing partner becomes an ordinary
/// character, so the tokens always cover the input exactly.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(len) = closed_run(rest, CODE) {
            tokens.push(Token::span(&rest[..len]));
            pos += len;
            continue;
        }

        if let Some(len) = closed_run(rest, BOLD) {
            tokens.push(Token::span(&rest[..len]));
            pos += len;
            continue;
        }

        // pos always sits on a char boundary, so rest is never empty here
        let width = rest.chars().next().map_or(1, char::len_utf8);
        tokens.push(Token::char(&rest[..width]));
        pos += width;
    }

    tokens
}

/// Byte length of `delim ... delim` at the start of `rest`, if it closes.
fn closed_run(rest: &str, delim: &str) -> Option<usize> {
    let body = rest.strip_prefix(delim)?;
    body.find(delim).map(|close| delim.len() + close + delim.len())
}
