//! Sequence builders
//!
//! Seed chains, per-family replacement tables, and the parametric
//! E-sequence generator.

pub mod e_sequence;
pub mod families;

pub use e_sequence::*;
pub use families::*;
