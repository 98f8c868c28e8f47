//! Lexer implementation

use super::token::*;
use antpath_core::ParseError;
use std::iter::Peekable;
use std::str::Chars;

// ============================================================================
// LEXER IMPLEMENTATION
// ============================================================================

/// Character-class lexer for command chains.
///
/// Positions are character offsets, so multi-byte symbols such as `£`
/// count as one.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            pos: 0,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    ///
    /// Always ends with `Eof`. Lexing continues past errors; the parser
    /// reports the first one it reaches.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Get the next token from the source.
    fn next_token(&mut self) -> Token {
        self.skip_spaces();

        let start = self.pos;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => match c {
                '|' => {
                    self.advance();
                    TokenKind::Pipe
                }
                ':' => {
                    self.advance();
                    TokenKind::Colon
                }
                '.' => {
                    self.advance();
                    TokenKind::Dot
                }
                '"' => self.scan_string(),
                '-' => self.scan_number(),
                c if c.is_ascii_digit() => self.scan_number(),
                c if is_ident_start(c) => self.scan_identifier(),
                c => {
                    self.advance();
                    TokenKind::Error(ParseError::new(
                        start,
                        Some(c),
                        format!("Unexpected character: {}", c),
                    ))
                }
            },
        };

        Token {
            kind,
            span: Span {
                start,
                end: self.pos,
            },
        }
    }

    /// Scan a PlainVariable.
    fn scan_identifier(&mut self) -> TokenKind {
        let mut ident = String::new();

        while let Some(c) = self.peek_char() {
            if is_ident_char(c) {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::Identifier(ident)
    }

    /// Scan an Integer or Float.
    ///
    /// Integer: `0` or `-?[1-9][0-9]*`. Float: an integer part, `.`, and at
    /// least one digit. A minus sign is never followed by `0`, so `-0` and
    /// `-0.5` are both rejected at the zero.
    fn scan_number(&mut self) -> TokenKind {
        let mut text = String::new();

        if self.peek_char() == Some('-') {
            text.push('-');
            self.advance();
            match self.peek_char() {
                Some('0') => {
                    return self.error_here(Some('0'), "Expected non-zero digit after '-'")
                }
                Some(c) if c.is_ascii_digit() => {}
                found => return self.error_here(found, "Expected digit after '-'"),
            }
        }

        match self.peek_char() {
            Some('0') => {
                text.push('0');
                self.advance();
                if let Some(c) = self.peek_char().filter(|c| c.is_ascii_digit()) {
                    return self.error_here(Some(c), "Leading zeros are not allowed");
                }
            }
            _ => self.take_digits(&mut text),
        }

        if self.peek_char() == Some('.') {
            text.push('.');
            self.advance();
            match self.peek_char() {
                Some(c) if c.is_ascii_digit() => self.take_digits(&mut text),
                found => return self.error_here(found, "Expected digit after '.'"),
            }
        }

        TokenKind::Number(text)
    }

    /// Scan a double-quoted string literal.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // Skip opening quote
        let mut content = String::new();

        loop {
            match self.peek_char() {
                None => return self.error_here(None, "Unterminated string literal"),
                Some('"') => {
                    self.advance();
                    return TokenKind::String(content);
                }
                Some(c) if is_string_char(c) => {
                    content.push(c);
                    self.advance();
                }
                Some(c) => {
                    return self.error_here(
                        Some(c),
                        format!("Unexpected character in string literal: {}", c),
                    )
                }
            }
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek_char().filter(|c| c.is_ascii_digit()) {
            text.push(c);
            self.advance();
        }
    }

    /// Error at the current position. The offending character is consumed
    /// so that scanning always makes progress.
    fn error_here(&mut self, found: Option<char>, message: impl Into<String>) -> TokenKind {
        let offset = self.pos;
        if found.is_some() {
            self.advance();
        }
        TokenKind::Error(ParseError::new(offset, found, message))
    }

    /// Only U+0020 separates tokens; tabs and newlines are errors.
    fn skip_spaces(&mut self) {
        while self.peek_char() == Some(' ') {
            self.advance();
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lexer_statement() {
        assert_eq!(
            kinds("T:-90|DL:4|"),
            vec![
                TokenKind::Identifier("T".to_string()),
                TokenKind::Colon,
                TokenKind::Number("-90".to_string()),
                TokenKind::Pipe,
                TokenKind::Identifier("DL".to_string()),
                TokenKind::Colon,
                TokenKind::Number("4".to_string()),
                TokenKind::Pipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        assert_eq!(kinds("0")[0], TokenKind::Number("0".to_string()));
        assert_eq!(kinds("0.25")[0], TokenKind::Number("0.25".to_string()));
        assert_eq!(kinds("12.50")[0], TokenKind::Number("12.50".to_string()));
        assert_eq!(kinds("-1.5")[0], TokenKind::Number("-1.5".to_string()));
        assert_eq!(kinds("-17")[0], TokenKind::Number("-17".to_string()));
    }

    #[test]
    fn test_lexer_number_errors() {
        let cases = [
            ("-", 1, None),
            ("-x", 1, Some('x')),
            ("-0", 1, Some('0')),
            ("-0.5", 1, Some('0')),
            ("-00", 1, Some('0')),
            ("07", 1, Some('7')),
            ("4.", 2, None),
            ("4.x", 2, Some('x')),
        ];
        for (source, offset, found) in cases {
            match &kinds(source)[0] {
                TokenKind::Error(err) => {
                    assert_eq!(err.offset, offset, "offset for {:?}", source);
                    assert_eq!(err.found, found, "found for {:?}", source);
                }
                other => panic!("Expected error for {:?}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_lexer_identifiers_with_symbols() {
        assert_eq!(
            kinds("$a£&^*9")[0],
            TokenKind::Identifier("$a£&^*9".to_string())
        );
    }

    #[test]
    fn test_lexer_spans_count_characters() {
        let tokens = Lexer::new("£x|D").tokenize();
        assert_eq!(tokens[0].span, Span { start: 0, end: 2 });
        assert_eq!(tokens[1].span, Span { start: 2, end: 3 });
        assert_eq!(tokens[2].span, Span { start: 3, end: 4 });
        assert_eq!(tokens[3].span, Span { start: 4, end: 4 });
    }

    #[test]
    fn test_lexer_string_literals() {
        assert_eq!(
            kinds("\"hello (world).\"")[0],
            TokenKind::String("hello (world).".to_string())
        );
        assert_eq!(kinds("\"\"")[0], TokenKind::String(String::new()));
    }

    #[test]
    fn test_lexer_unterminated_string() {
        match &kinds("\"abc")[0] {
            TokenKind::Error(err) => {
                assert_eq!(err.offset, 4);
                assert_eq!(err.found, None);
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_skips_spaces_only() {
        assert_eq!(
            kinds("  D : 2 "),
            vec![
                TokenKind::Identifier("D".to_string()),
                TokenKind::Colon,
                TokenKind::Number("2".to_string()),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(kinds("\tD")[0], TokenKind::Error(_)));
        assert!(matches!(kinds("D\n")[1], TokenKind::Error(_)));
    }

    #[test]
    fn test_lexer_error_on_invalid_char() {
        let tokens = Lexer::new("D:2|BADTOKEN#").tokenize();
        let err = tokens
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::Error(err) => Some(err.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(err.offset, 12);
        assert_eq!(err.found, Some('#'));
    }
}
