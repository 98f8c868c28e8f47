//! Fuzz target for the chain parser
//!
//! Arbitrary UTF-8 must parse or fail without panicking. Errors point at a
//! character inside the input (or its end), and successful parses print
//! back to text that parses to the same sequence.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use antpath_dsl::{parse, to_chain, Lexer, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        match parse(input) {
            Ok(sequence) => {
                let printed = to_chain(&sequence, false);
                match parse(&printed) {
                    Ok(reparsed) => assert_eq!(reparsed, sequence, "round trip changed {:?}", input),
                    Err(err) => panic!("printed chain {:?} failed to parse: {}", printed, err),
                }
            }
            Err(err) => {
                assert!(err.offset <= input.chars().count(), "error offset out of range");
                assert_eq!(
                    err.found,
                    input.chars().nth(err.offset),
                    "found char does not match offset"
                );
                assert!(!err.message.is_empty(), "error message should not be empty");
            }
        }

        // Lexer -> parser pipeline directly
        let tokens = Lexer::new(input).tokenize();
        let _ = Parser::new(tokens).parse();
    }
});
