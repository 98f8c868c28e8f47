//! Fuzz target for the chain lexer
//!
//! Arbitrary UTF-8 must tokenize without panicking, end in `Eof`, and keep
//! every span inside the input.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=60

#![no_main]

use antpath_dsl::{Lexer, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let char_count = input.chars().count();
        let tokens = Lexer::new(input).tokenize();

        assert!(!tokens.is_empty(), "tokenize must produce at least Eof");
        assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "last token must be Eof"
        );

        for token in &tokens {
            assert!(token.span.start <= token.span.end, "span start after end");
            assert!(token.span.end <= char_count, "span past end of input");
            if let TokenKind::Error(err) = &token.kind {
                assert!(err.offset <= char_count, "error offset past end of input");
            }
        }
    }
});
