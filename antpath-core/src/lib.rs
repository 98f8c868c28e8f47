//! ANTPATH Core - Sequence Types
//!
//! Pure data structures shared by the parser, the rewrite engine and the
//! walker. This crate contains no parsing and no I/O.

pub mod config;
pub mod error;
pub mod sequence;
pub mod table;

pub use config::*;
pub use error::*;
pub use sequence::*;
pub use table::*;
