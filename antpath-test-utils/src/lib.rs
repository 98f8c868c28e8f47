//! ANTPATH Test Utilities
//!
//! Shared test infrastructure for the antpath workspace:
//! - Proptest generators for operations and sequences
//! - Fixtures for common chains and tables
//! - Assertions for parse errors

// Re-export core types for convenience
pub use antpath_core::{
    Arg, Operation, ParseError, ReplacementRule, ReplacementTable, RewriteError, Sequence,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for chain values.

    use super::*;
    use proptest::prelude::*;

    // === Names ===

    /// Generate a PlainVariable, including the symbol characters.
    pub fn arb_name() -> impl Strategy<Value = String> {
        "[A-Za-z$£&^*][A-Za-z0-9$£&^*]{0,5}".prop_map(|s| s.to_string())
    }

    /// Generate one of the names the ant understands.
    pub fn arb_known_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("D"), Just("D2"), Just("DL"), Just("DR"), Just("T"), Just("S"),
            Just("C"), Just("A"), Just("B"),
        ]
        .prop_map(|s| s.to_string())
    }

    // === Arguments ===

    /// Generate a finite float argument that has a chain spelling.
    ///
    /// Values in (-1, 0) would need a `-0.` prefix, which the grammar does
    /// not allow, so they are mirrored to positive.
    pub fn arb_float() -> impl Strategy<Value = f64> {
        prop_oneof![
            -1.0e9f64..1.0e9f64,
            (-1000i32..1000).prop_map(|n| f64::from(n) / 8.0),
        ]
        .prop_map(|value| if value > -1.0 && value < 0.0 { -value } else { value })
    }

    /// Generate a string literal body the grammar accepts.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9$£&^*.() ]{0,12}".prop_map(|s| s.to_string())
    }

    /// Generate any argument kind.
    pub fn arb_arg() -> impl Strategy<Value = Arg> {
        prop_oneof![
            any::<i64>().prop_map(Arg::Int),
            arb_float().prop_map(Arg::Float),
            arb_name().prop_map(Arg::Ident),
            (arb_name(), arb_name()).prop_map(|(object, field)| Arg::Member { object, field }),
            arb_text().prop_map(Arg::Text),
        ]
    }

    /// Generate a numeric argument.
    pub fn arb_number_arg() -> impl Strategy<Value = Arg> {
        prop_oneof![
            (-100_000i64..100_000).prop_map(Arg::Int),
            arb_float().prop_map(Arg::Float),
        ]
    }

    // === Operations and sequences ===

    /// Generate an operation with an optional argument.
    pub fn arb_operation() -> impl Strategy<Value = Operation> {
        (arb_name(), proptest::option::of(arb_arg()))
            .prop_map(|(name, arg)| Operation::new(name, arg))
    }

    /// Generate an operation the ant can execute.
    pub fn arb_ant_operation() -> impl Strategy<Value = Operation> {
        (arb_known_name(), arb_number_arg()).prop_map(|(name, arg)| {
            if name == "C" {
                Operation::new(name, Some(Arg::Ident("c1".to_string())))
            } else if name == "A" || name == "B" {
                Operation::bare(name)
            } else {
                Operation::new(name, Some(arg))
            }
        })
    }

    /// Generate a sequence of up to `max_len` operations.
    pub fn arb_sequence(max_len: usize) -> impl Strategy<Value = Sequence> {
        proptest::collection::vec(arb_operation(), 0..=max_len).prop_map(Sequence::from)
    }

    /// Generate a table of up to `max_rules` rules with distinct names.
    pub fn arb_table(max_rules: usize) -> impl Strategy<Value = ReplacementTable> {
        proptest::collection::btree_map(arb_name(), arb_sequence(4), 0..=max_rules).prop_map(
            |rules| {
                let mut table = ReplacementTable::new();
                for (name, sequence) in rules {
                    // Keys are unique, so insert cannot fail.
                    let _ = table.insert(ReplacementRule::new(name, sequence));
                }
                table
            },
        )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built chains and tables.

    use super::*;

    /// Chains that must parse, with their operation counts.
    pub const VALID_CHAINS: &[(&str, usize)] = &[
        ("D:2|D2:3|T:3|D:1", 4),
        ("T:-90|DL:4|T:90|", 3),
        ("A", 1),
        ("", 0),
        ("  S:0.25 | C:c1 |P:ant.x| ", 3),
        ("L:\"hello (world).\"|$£:-1.5", 2),
    ];

    /// Chains that must fail, with the expected offset and character.
    pub const INVALID_CHAINS: &[(&str, usize, Option<char>)] = &[
        ("D:2|BADTOKEN#", 12, Some('#')),
        ("D:", 2, None),
        ("|D", 0, Some('|')),
        ("D:1||T", 4, Some('|')),
        ("D\t:1", 1, Some('\t')),
        ("T:07", 3, Some('7')),
        ("N:-0.5", 3, Some('0')),
        ("L:\"open", 7, None),
    ];

    /// `A -> A B`, `B -> A`; generation lengths follow Fibonacci numbers.
    pub fn fibonacci_table() -> ReplacementTable {
        let mut table = ReplacementTable::new();
        let _ = table.insert(ReplacementRule::new(
            "A",
            vec![Operation::bare("A"), Operation::bare("B")].into(),
        ));
        let _ = table.insert(ReplacementRule::new("B", vec![Operation::bare("A")].into()));
        table
    }

    /// Square walked with unit draws and right turns.
    pub fn unit_square() -> Sequence {
        (0..4)
            .flat_map(|_| {
                [
                    Operation::with_arg("D", 1i64),
                    Operation::with_arg("T", 90i64),
                ]
            })
            .collect()
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for parse results.

    use super::*;

    /// Assert that a parse failed at `offset` on `found`.
    #[track_caller]
    pub fn assert_parse_error_at<T: std::fmt::Debug>(
        result: &Result<T, ParseError>,
        offset: usize,
        found: Option<char>,
    ) {
        match result {
            Err(err) => {
                assert_eq!(err.offset, offset, "Wrong offset in {:?}", err);
                assert_eq!(err.found, found, "Wrong character in {:?}", err);
            }
            Ok(value) => panic!("Expected parse error at {}, got: {:?}", offset, value),
        }
    }

    /// Assert that two sequences have the same operation names in order.
    #[track_caller]
    pub fn assert_names(sequence: &Sequence, expected: &[&str]) {
        let names: Vec<&str> = sequence.names().collect();
        assert_eq!(names, expected, "Operation names differ");
    }
}
