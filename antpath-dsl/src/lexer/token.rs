//! Lexer token types

use antpath_core::ParseError;
use std::fmt;

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// Symbols allowed in identifiers besides ASCII letters and digits.
pub const USABLE_SYMBOLS: [char; 5] = ['$', '£', '&', '^', '*'];

/// First character of a PlainVariable: a letter or a usable symbol.
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || USABLE_SYMBOLS.contains(&c)
}

/// Any later character of a PlainVariable.
pub fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Characters allowed between the quotes of a string literal.
pub fn is_string_char(c: char) -> bool {
    is_ident_char(c) || c == '.' || c == '(' || c == ')' || c.is_whitespace()
}

// ============================================================================
// TOKENS
// ============================================================================

/// Token kinds for the chain DSL.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Delimiters
    Pipe,
    Colon,
    Dot,

    // Literals
    Identifier(String),
    /// Number text as written, validated against the Integer/Float rules.
    Number(String),
    /// String literal contents, without the quotes.
    String(String),

    // Special
    Eof,
    Error(ParseError),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Pipe => f.write_str("'|'"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Dot => f.write_str("'.'"),
            TokenKind::Identifier(name) => write!(f, "identifier {}", name),
            TokenKind::Number(text) => write!(f, "number {}", text),
            TokenKind::String(text) => write!(f, "string \"{}\"", text),
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Error(err) => write!(f, "error ({})", err.message),
        }
    }
}

/// Source span in character offsets, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
