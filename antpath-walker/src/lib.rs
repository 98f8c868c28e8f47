//! ANTPATH Walker - Function-Map Dispatch for Operation Sequences
//!
//! A [`Walker`] pops one operation at a time and dispatches it by name
//! through a [`FunctionMap`]. The ant map drives an [`Ant`] turtle across
//! an integer grid.

pub mod ant;
pub mod color;
pub mod error;
pub mod function_map;
pub mod walker;

pub use ant::*;
pub use color::*;
pub use error::*;
pub use function_map::*;
pub use walker::*;
