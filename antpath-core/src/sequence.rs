//! Operation and sequence types
//!
//! A [`Sequence`] is the parsed form of a command chain such as
//! `T:-90|DL:4|T:90|`. Order is load-bearing: the consumer executes the
//! operations front to back.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Argument attached to an operation with `name:arg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    /// `0`, `42`, `-90`
    Int(i64),
    /// `0.25`, `-2.5`. Values in (-1, 0) display as `-0.x`, which the
    /// parser rejects, so they never come out of a parse.
    Float(f64),
    /// Bare identifier, e.g. the colour tag in `C:c1`
    Ident(String),
    /// Dotted identifier, `object.field`
    Member { object: String, field: String },
    /// Quoted string literal. Holds the text between the quotes.
    Text(String),
}

impl Arg {
    /// Numeric value of an `Int` or `Float` argument.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Arg::Int(value) => Some(*value as f64),
            Arg::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Identifier text of an `Ident` argument.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Arg::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Arg::Int(_) | Arg::Float(_))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(value) => write!(f, "{}", value),
            Arg::Float(value) => {
                // Keep integral floats distinguishable from integers.
                let text = format_number(*value);
                if text.contains('.') || !value.is_finite() {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Arg::Ident(name) => f.write_str(name),
            Arg::Member { object, field } => write!(f, "{}.{}", object, field),
            Arg::Text(text) => write!(f, "\"{}\"", text),
        }
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

/// Format a float in the chain grammar's number syntax.
///
/// Integral values print without a fraction (`48`), fractional values always
/// carry at least one digit on each side of the dot (`0.25`), and negative
/// zero prints as `0`. Rust's `Display` for `f64` never uses exponent form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = format!("{}", value);
    match text.strip_suffix(".0") {
        Some(integral) => integral.to_string(),
        None => text,
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// One `name[:arg]` statement of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub arg: Option<Arg>,
}

impl Operation {
    pub fn new(name: impl Into<String>, arg: Option<Arg>) -> Self {
        Self {
            name: name.into(),
            arg,
        }
    }

    /// Operation without an argument, e.g. the Hilbert symbol `A`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn with_arg(name: impl Into<String>, arg: impl Into<Arg>) -> Self {
        Self::new(name, Some(arg.into()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}:{}", self.name, arg),
            None => f.write_str(&self.name),
        }
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

/// Ordered list of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Operation>);

impl Sequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, op: Operation) {
        self.0.push(op);
    }

    pub fn extend_from(&mut self, other: &Sequence) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn operations(&self) -> &[Operation] {
        &self.0
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.0
    }

    /// Hand the operations to a consumer that pops from the front.
    pub fn into_queue(self) -> VecDeque<Operation> {
        self.0.into()
    }

    /// Names of all operations, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|op| op.name.as_str())
    }
}

impl Deref for Sequence {
    type Target = [Operation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Operation>> for Sequence {
    fn from(ops: Vec<Operation>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Operation> for Sequence {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Sequence {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Chain form: operations joined by `|`, no trailing pipe.
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// Count operations whose name is one of `names`.
///
/// Used by consumers to size progress and pacing, e.g. the number of draw
/// steps in a generation.
pub fn count_all(names: &[&str], sequence: &[Operation]) -> usize {
    sequence
        .iter()
        .filter(|op| names.contains(&op.name.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(names: &[&str]) -> Sequence {
        names.iter().map(|n| Operation::bare(*n)).collect()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(48.0), "48");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-90.0), "-90");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(38.4), "38.4");
        assert_eq!(format_number(1e-7), "0.0000001");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::with_arg("T", -90i64).to_string(), "T:-90");
        assert_eq!(Operation::with_arg("S", 0.25).to_string(), "S:0.25");
        assert_eq!(Operation::with_arg("S", 4.0).to_string(), "S:4.0");
        assert_eq!(Operation::bare("A").to_string(), "A");
        assert_eq!(
            Operation::new("C", Some(Arg::Ident("c1".to_string()))).to_string(),
            "C:c1"
        );
        assert_eq!(
            Operation::new(
                "P",
                Some(Arg::Member {
                    object: "ant".to_string(),
                    field: "x".to_string()
                })
            )
            .to_string(),
            "P:ant.x"
        );
        assert_eq!(
            Operation::new("L", Some(Arg::Text("hi there".to_string()))).to_string(),
            "L:\"hi there\""
        );
    }

    #[test]
    fn test_sequence_display_joins_with_pipes() {
        let seq: Sequence = vec![
            Operation::with_arg("D", 2i64),
            Operation::bare("A"),
            Operation::with_arg("T", 90i64),
        ]
        .into();
        assert_eq!(seq.to_string(), "D:2|A|T:90");
        assert_eq!(Sequence::new().to_string(), "");
    }

    #[test]
    fn test_count_all() {
        let seq = ops(&["DL", "T", "DR", "DL", "C", "DR", "DL", "S"]);
        assert_eq!(count_all(&["DL", "DR"], &seq), 5);
        assert_eq!(count_all(&["M"], &seq), 0);
        assert_eq!(count_all(&[], &seq), 0);
    }

    #[test]
    fn test_arg_numeric_views() {
        assert_eq!(Arg::Int(4).as_f64(), Some(4.0));
        assert_eq!(Arg::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Arg::Ident("c1".to_string()).as_f64(), None);
        assert_eq!(Arg::Ident("c1".to_string()).as_ident(), Some("c1"));
        assert!(!Arg::Text("1".to_string()).is_number());
    }

    #[test]
    fn test_into_queue_preserves_order() {
        let mut queue = ops(&["A", "B", "C"]).into_queue();
        assert_eq!(queue.pop_front().map(|op| op.name), Some("A".to_string()));
        assert_eq!(queue.pop_front().map(|op| op.name), Some("B".to_string()));
        assert_eq!(queue.len(), 1);
    }

    mod props {
        use super::super::format_number;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_number_is_exact_and_plain(value in -1.0e9f64..1.0e9f64) {
                let text = format_number(value);
                prop_assert!(!text.contains('e'));
                prop_assert!(!text.starts_with("-0") || text.starts_with("-0."));
                let back: f64 = text.parse().unwrap();
                prop_assert_eq!(back, if value == 0.0 { 0.0 } else { value });
            }
        }
    }
}
