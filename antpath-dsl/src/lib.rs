//! ANTPATH DSL - Chain Parser, Sequence Builders & L-system Rewriting
//!
//! Architecture:
//! ```text
//! Chain Source ("T:-90|DL:4|T:90|")
//!     ↓
//! Lexer (positioned tokens)
//!     ↓
//! Parser (recursive descent → Sequence)
//!     ↓
//! Rewrite Engine (one pass per call, driven by generations/expand)
//!     ↓
//! Pretty Printer (chain text, for round-trip testing and output)
//! ```
//!
//! The builder module produces the seed chains and replacement tables for
//! each fractal family, plus the parametric E-sequence.

pub mod builder;
pub mod lexer;
pub mod parser;
pub mod pretty_printer;
pub mod rewrite;

// Re-export key types for convenience
pub use antpath_core::{
    count_all, Arg, FractalFamily, Operation, ParseError, ReplacementRule, ReplacementTable,
    Sequence,
};
pub use builder::*;
pub use lexer::*;
pub use parser::*;
pub use pretty_printer::*;
pub use rewrite::*;
