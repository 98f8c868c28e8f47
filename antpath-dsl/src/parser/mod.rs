//! Parser module for the chain DSL

pub mod parser;

pub use parser::*;
