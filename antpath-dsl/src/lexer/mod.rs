//! Lexer module for the chain DSL

pub mod token;
pub mod scanner;

pub use token::*;
pub use scanner::*;
