//! L-system rewrite engine
//!
//! One call is one pass: every operation whose name has a rule is replaced
//! by that rule's sequence, everything else is copied through in order, and
//! inserted operations are not rescanned. Deeper generations come from
//! calling the pass again, either directly or through [`generations`] and
//! [`expand`].

use antpath_core::{Operation, ReplacementTable, RewriteError, Sequence};

// ============================================================================
// SINGLE PASS
// ============================================================================

/// Apply one substitution pass, returning a new sequence.
pub fn replace_functions_in_map(table: &ReplacementTable, sequence: &[Operation]) -> Sequence {
    let mut output = Sequence::with_capacity(expanded_len(table, sequence));
    let mut replaced = 0usize;

    for op in sequence {
        match table.get(&op.name) {
            Some(expansion) => {
                output.extend_from(expansion);
                replaced += 1;
            }
            None => output.push(op.clone()),
        }
    }

    tracing::debug!(
        input = sequence.len(),
        output = output.len(),
        replaced,
        "rewrite pass"
    );

    output
}

/// Length the next pass would produce, without building it.
pub fn expanded_len(table: &ReplacementTable, sequence: &[Operation]) -> usize {
    sequence
        .iter()
        .map(|op| table.get(&op.name).map_or(1, |expansion| expansion.len()))
        .sum()
}

// ============================================================================
// DRIVERS
// ============================================================================

/// Successive generations of a seed. The first item is the seed itself.
pub struct Generations<'a> {
    table: &'a ReplacementTable,
    current: Sequence,
    started: bool,
}

impl Iterator for Generations<'_> {
    type Item = Sequence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.current = replace_functions_in_map(self.table, &self.current);
        }
        self.started = true;
        Some(self.current.clone())
    }
}

/// Iterate generations 0, 1, 2, … of `seed` under `table`.
pub fn generations(table: &ReplacementTable, seed: Sequence) -> Generations<'_> {
    Generations {
        table,
        current: seed,
        started: false,
    }
}

/// Apply `depth` passes to `seed`.
///
/// Fails before building any generation longer than `max_operations`.
pub fn expand(
    table: &ReplacementTable,
    seed: &[Operation],
    depth: usize,
    max_operations: usize,
) -> Result<Sequence, RewriteError> {
    if seed.len() > max_operations {
        return Err(RewriteError::SequenceTooLong {
            generation: 0,
            length: seed.len(),
            limit: max_operations,
        });
    }

    let mut current = Sequence::from(seed.to_vec());
    for generation in 1..=depth {
        let length = expanded_len(table, &current);
        if length > max_operations {
            tracing::warn!(generation, length, limit = max_operations, "generation too long");
            return Err(RewriteError::SequenceTooLong {
                generation,
                length,
                limit: max_operations,
            });
        }
        current = replace_functions_in_map(table, &current);
    }

    tracing::debug!(depth, operations = current.len(), "expanded seed");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use antpath_core::{ParseError, ReplacementRule};

    fn table(rules: &[(&str, &str)]) -> Result<ReplacementTable, Box<dyn std::error::Error>> {
        let mut table = ReplacementTable::new();
        for (name, chain) in rules {
            table.insert(ReplacementRule::new(*name, parse(chain)?))?;
        }
        Ok(table)
    }

    #[test]
    fn test_replace_does_not_rescan() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("D", "X|Y|D")])?;
        let seq = parse("D|T|D")?;

        let out = replace_functions_in_map(&table, &seq);
        assert_eq!(out.to_string(), "X|Y|D|T|X|Y|D");
        Ok(())
    }

    #[test]
    fn test_replace_order_and_passthrough() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("D", "X|Y")])?;
        let seq = parse("D|T|D")?;

        let out = replace_functions_in_map(&table, &seq);
        assert_eq!(out.names().collect::<Vec<_>>(), vec!["X", "Y", "T", "X", "Y"]);
        // Input untouched
        assert_eq!(seq.to_string(), "D|T|D");
        Ok(())
    }

    #[test]
    fn test_replace_ignores_argument() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("DL", "DL:1|DR:1")])?;
        let out = replace_functions_in_map(&table, &parse("DL:0")?);
        assert_eq!(out.to_string(), "DL:1|DR:1");
        Ok(())
    }

    #[test]
    fn test_identity_pass() -> Result<(), ParseError> {
        let seq = parse("D:2|D2:3|T:3|D:1")?;
        let out = replace_functions_in_map(&ReplacementTable::new(), &seq);
        assert_eq!(out, seq);
        Ok(())
    }

    #[test]
    fn test_empty_expansion_deletes() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = ReplacementTable::new();
        table.insert(ReplacementRule::new("A", Sequence::new()))?;
        let out = replace_functions_in_map(&table, &parse("A|D:1|A")?);
        assert_eq!(out.to_string(), "D:1");
        Ok(())
    }

    #[test]
    fn test_expanded_len_matches_pass() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("A", "A|B"), ("B", "A")])?;
        let seq = parse("A|B|C")?;
        assert_eq!(expanded_len(&table, &seq), 4);
        assert_eq!(replace_functions_in_map(&table, &seq).len(), 4);
        Ok(())
    }

    #[test]
    fn test_generations_fibonacci() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("A", "A|B"), ("B", "A")])?;
        let lengths: Vec<usize> = generations(&table, parse("A")?)
            .take(7)
            .map(|g| g.len())
            .collect();
        assert_eq!(lengths, vec![1, 2, 3, 5, 8, 13, 21]);
        Ok(())
    }

    #[test]
    fn test_expand_matches_generations() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("A", "A|B"), ("B", "A")])?;
        let seed = parse("A")?;
        let via_iter = generations(&table, seed.clone()).nth(4);
        let via_expand = expand(&table, &seed, 4, 100)?;
        assert_eq!(via_iter, Some(via_expand));

        assert_eq!(expand(&table, &seed, 0, 100)?, seed);
        Ok(())
    }

    #[test]
    fn test_expand_limit() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[("A", "A|B"), ("B", "A")])?;
        let seed = parse("A")?;

        assert_eq!(expand(&table, &seed, 4, 8)?.len(), 8);
        assert_eq!(
            expand(&table, &seed, 5, 8),
            Err(RewriteError::SequenceTooLong {
                generation: 5,
                length: 13,
                limit: 8
            })
        );
        Ok(())
    }

    #[test]
    fn test_expand_rejects_long_seed() -> Result<(), ParseError> {
        let seed = parse("A|A|A")?;
        assert!(matches!(
            expand(&ReplacementTable::new(), &seed, 0, 2),
            Err(RewriteError::SequenceTooLong { generation: 0, .. })
        ));
        Ok(())
    }
}
