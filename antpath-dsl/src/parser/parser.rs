//! Parser implementation
//!
//! Recursive descent over the token stream:
//!
//! ```text
//! Chain          := BasicStatement ( '|' BasicStatement )* '|'?   | <empty>
//! BasicStatement := PlainVariable ( ':' AnyVar )?
//! AnyVar         := Number | ObjectVariable | PlainVariable | StringLiteral
//! ObjectVariable := PlainVariable '.' PlainVariable       (no spaces)
//! ```

use crate::lexer::*;
use antpath_core::{Arg, Operation, ParseError, Sequence};

// ============================================================================
// PARSER
// ============================================================================

/// Parser for command chains.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
}

impl Parser {
    /// Create a new parser from a vector of tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the tokens into an operation sequence.
    pub fn parse(&mut self) -> Result<Sequence, ParseError> {
        let mut sequence = Sequence::new();

        if self.is_at_end() {
            return Ok(sequence);
        }

        loop {
            sequence.push(self.parse_statement()?);

            match &self.current().kind {
                TokenKind::Eof => break,
                TokenKind::Pipe => {
                    self.advance();
                    if self.is_at_end() {
                        break;
                    }
                }
                _ => return Err(self.error("Expected '|' or end of input")),
            }
        }

        Ok(sequence)
    }

    /// Parse `name[:arg]`.
    pub(crate) fn parse_statement(&mut self) -> Result<Operation, ParseError> {
        let name = self.expect_identifier("Expected operation name")?;

        let arg = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_arg()?)
        } else {
            None
        };

        Ok(Operation { name, arg })
    }

    /// Parse the value after a colon.
    pub(crate) fn parse_arg(&mut self) -> Result<Arg, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number(text) => {
                self.advance();
                number_arg(&text, token.span)
            }
            TokenKind::Identifier(object) => {
                self.advance();
                if self.check(&TokenKind::Dot) && self.current().span.start == token.span.end {
                    self.parse_member(object)
                } else {
                    Ok(Arg::Ident(object))
                }
            }
            TokenKind::String(text) => {
                self.advance();
                Ok(Arg::Text(text))
            }
            _ => Err(self.error("Expected argument after ':'")),
        }
    }

    /// Parse the `.field` half of an ObjectVariable; the current token is the dot.
    fn parse_member(&mut self, object: String) -> Result<Arg, ParseError> {
        let dot_end = self.current().span.end;
        self.advance();

        let token = self.current().clone();
        match token.kind {
            TokenKind::Identifier(field) if token.span.start == dot_end => {
                self.advance();
                Ok(Arg::Member { object, field })
            }
            // Only spaces are skipped between tokens, so a gap is a space.
            _ if token.span.start != dot_end => Err(ParseError::new(
                dot_end,
                Some(' '),
                "Expected field name after '.'",
            )),
            _ => Err(self.error("Expected field name after '.'")),
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn expect_identifier(&mut self, msg: &str) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Identifier(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.error(msg)),
        }
    }

    /// Error at the current token. A lexer error token reports itself.
    pub(crate) fn error(&self, msg: &str) -> ParseError {
        let token = self.current();
        if let TokenKind::Error(err) = &token.kind {
            return err.clone();
        }
        ParseError::new(token.span.start, first_char(&token.kind), msg)
    }
}

/// First source character of a well-formed token.
fn first_char(kind: &TokenKind) -> Option<char> {
    match kind {
        TokenKind::Pipe => Some('|'),
        TokenKind::Colon => Some(':'),
        TokenKind::Dot => Some('.'),
        TokenKind::String(_) => Some('"'),
        TokenKind::Identifier(text) | TokenKind::Number(text) => text.chars().next(),
        TokenKind::Eof | TokenKind::Error(_) => None,
    }
}

fn number_arg(text: &str, span: Span) -> Result<Arg, ParseError> {
    let first = text.chars().next();
    if text.contains('.') {
        text.parse::<f64>()
            .map(Arg::Float)
            .map_err(|e| ParseError::new(span.start, first, format!("Invalid number {}: {}", text, e)))
    } else {
        text.parse::<i64>()
            .map(Arg::Int)
            .map_err(|_| ParseError::new(span.start, first, format!("Integer literal out of range: {}", text)))
    }
}

// ============================================================================
// CONVENIENCE FUNCTIONS
// ============================================================================

/// Parse a command chain into an operation sequence.
pub fn parse(source: &str) -> Result<Sequence, ParseError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    let mut parser = Parser::new(tokens);
    let result = parser.parse();

    match &result {
        Ok(sequence) => tracing::debug!(operations = sequence.len(), "parsed chain"),
        Err(err) => tracing::debug!(offset = err.offset, error = %err.message, "chain rejected"),
    }

    result
}

// ============================================================================
// TESTS
// ============================================================================
