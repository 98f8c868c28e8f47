//! Seeds and replacement tables for each fractal family
//!
//! Every rule is written as chain text and parsed once when the table is
//! built, so a malformed rule fails here and never at rewrite time.

use super::e_sequence::{e_sequence, FixedJitter, Jitter};
use crate::parser::parse;
use antpath_core::{
    check_length, format_number, BuildError, ESequenceParams, FractalFamily, ReplacementRule,
    ReplacementTable, Sequence,
};
use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

/// Operation names that move the ant; used to size progress and pacing.
pub const DRAW_NAMES: [&str; 5] = ["M", "D", "D2", "DL", "DR"];

// ============================================================================
// SEEDS
// ============================================================================

/// Seed chain for `family` with segments of `side_length`.
pub fn seed_chain(family: FractalFamily, side_length: f64) -> Result<String, BuildError> {
    check_length("side_length", side_length)?;
    let s = format_number(side_length);

    let chain = match family {
        FractalFamily::Hilbert => "A".to_string(),
        FractalFamily::ECurve => "DL:0".to_string(),
        FractalFamily::Sierpinski => "DR:0".to_string(),
        FractalFamily::Zigzag => {
            format!("T:45|DL:{s}|T:-90|DR:{s}|T:90|DL:{s}|T:-90|DR:{s}|T:45")
        }
        FractalFamily::Generic => "D:0".to_string(),
    };
    Ok(chain)
}

/// Parsed seed sequence (generation 0).
pub fn seed(family: FractalFamily, side_length: f64) -> Result<Sequence, BuildError> {
    let chain = seed_chain(family, side_length)?;
    parse_rule(family, "seed", &chain)
}

// ============================================================================
// REPLACEMENT TABLES
// ============================================================================

/// Replacement table for `family` with segments of `side_length`.
pub fn replacements(
    family: FractalFamily,
    side_length: f64,
) -> Result<ReplacementTable, BuildError> {
    let table = match family {
        FractalFamily::Hilbert => hilbert_replacements(side_length)?,
        FractalFamily::ECurve => e_curve_replacements(side_length)?,
        FractalFamily::Sierpinski => sierpinski_replacements(side_length)?,
        FractalFamily::Zigzag => zigzag_replacements(side_length)?,
        FractalFamily::Generic => generic_replacements(
            &ESequenceParams::scaled(side_length),
            &mut FixedJitter::default(),
        )?,
    };

    tracing::debug!(
        family = %family,
        side_length,
        rules = table.len(),
        "built replacement table"
    );

    Ok(table)
}

/// Hilbert curve: `A` and `B` each quarter the scale, draw three segments
/// around four sub-curves, and restore the scale.
pub fn hilbert_replacements(side_length: f64) -> Result<ReplacementTable, BuildError> {
    check_length("side_length", side_length)?;
    let s = format_number(side_length);

    let a = format!("S:0.25|T:-90|B|D:{s}|T:90|A|D:{s}|A|T:90|D:{s}|B|T:-90|S:4|");
    let b = format!("S:0.25|T:90|A|D:{s}|T:-90|B|D:{s}|B|T:-90|D:{s}|A|T:90|S:4|");

    build_table(FractalFamily::Hilbert, &[("A", a), ("B", b)])
}

/// McKenna's E-curve (quadratic Gosper curve) on a 5x5 grid at 90°.
pub fn e_curve_replacements(side_length: f64) -> Result<ReplacementTable, BuildError> {
    const LEFT: &str = "LL+R+R-L-L+R+RL-R-LLR+L-R-LL-R+LR+R+L-L-RR+";
    const RIGHT: &str = "-LL+R+R-L-LR-L+RR+L+R-LRR+L+RL-L-R+R+L-L-RR";

    wrapped_turtle_table(
        FractalFamily::ECurve,
        side_length,
        90.0,
        (0.2, 5.0),
        LEFT,
        RIGHT,
    )
}

/// Sierpinski arrowhead at 60°.
pub fn sierpinski_replacements(side_length: f64) -> Result<ReplacementTable, BuildError> {
    wrapped_turtle_table(
        FractalFamily::Sierpinski,
        side_length,
        60.0,
        (0.5, 2.0),
        "R-L-R",
        "L+R+L",
    )
}

/// Zigzag: each segment folds into two 45° half-diagonals.
pub fn zigzag_replacements(side_length: f64) -> Result<ReplacementTable, BuildError> {
    wrapped_turtle_table(
        FractalFamily::Zigzag,
        side_length,
        45.0,
        (FRAC_1_SQRT_2, SQRT_2),
        "+L--R+",
        "-L++R-",
    )
}

/// Parametric family: every `D` becomes a full E-sequence.
pub fn generic_replacements(
    params: &ESequenceParams,
    jitter: &mut impl Jitter,
) -> Result<ReplacementTable, BuildError> {
    let sequence = e_sequence(params, jitter)?;
    let table = ReplacementTable::from_rules([ReplacementRule::new("D", sequence)])?;
    Ok(table)
}

// ============================================================================
// HELPERS
// ============================================================================

/// Expand turtle notation into chain text: `L`/`R` draw `DL`/`DR` of
/// `side`, runs of `+`/`-` collapse into one turn of `angle` per sign.
pub fn turtle_chain(rule: &str, side: &str, angle: f64) -> String {
    let mut steps: Vec<String> = Vec::new();
    let mut turns: i32 = 0;

    let flush = |turns: &mut i32, steps: &mut Vec<String>| {
        if *turns != 0 {
            steps.push(format!("T:{}", format_number(f64::from(*turns) * angle)));
            *turns = 0;
        }
    };

    for c in rule.chars() {
        match c {
            '+' => turns += 1,
            '-' => turns -= 1,
            'L' | 'R' => {
                flush(&mut turns, &mut steps);
                let name = if c == 'L' { "DL" } else { "DR" };
                steps.push(format!("{}:{}", name, side));
            }
            _ => {}
        }
    }
    flush(&mut turns, &mut steps);

    steps.join("|")
}

/// Table of `DL -> left`, `DR -> right`, each wrapped in `S:shrink … S:grow`.
fn wrapped_turtle_table(
    family: FractalFamily,
    side_length: f64,
    angle: f64,
    (shrink, grow): (f64, f64),
    left: &str,
    right: &str,
) -> Result<ReplacementTable, BuildError> {
    check_length("side_length", side_length)?;
    let s = format_number(side_length);

    let wrap = |rule: &str| {
        format!(
            "S:{}|{}|S:{}",
            format_number(shrink),
            turtle_chain(rule, &s, angle),
            format_number(grow)
        )
    };

    build_table(family, &[("DL", wrap(left)), ("DR", wrap(right))])
}

fn build_table(
    family: FractalFamily,
    rules: &[(&str, String)],
) -> Result<ReplacementTable, BuildError> {
    let mut table = ReplacementTable::new();
    for (name, chain) in rules {
        let sequence = parse_rule(family, name, chain)?;
        table.insert(ReplacementRule::new(*name, sequence))?;
    }
    Ok(table)
}

fn parse_rule(family: FractalFamily, rule: &str, chain: &str) -> Result<Sequence, BuildError> {
    parse(chain).map_err(|source| BuildError::Rule {
        family: family.to_string(),
        rule: rule.to_string(),
        source,
    })
}

/// Seed and table construction for a [`FractalFamily`].
pub trait FamilyBuilder {
    fn seed(&self, side_length: f64) -> Result<Sequence, BuildError>;
    fn replacements(&self, side_length: f64) -> Result<ReplacementTable, BuildError>;
}

impl FamilyBuilder for FractalFamily {
    fn seed(&self, side_length: f64) -> Result<Sequence, BuildError> {
        seed(*self, side_length)
    }

    fn replacements(&self, side_length: f64) -> Result<ReplacementTable, BuildError> {
        replacements(*self, side_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::replace_functions_in_map;
    use antpath_core::{count_all, Arg, Operation};

    fn names(seq: &Sequence) -> Vec<&str> {
        seq.names().collect()
    }

    #[test]
    fn test_hilbert_single_pass() -> Result<(), BuildError> {
        let table = hilbert_replacements(8.0)?;
        let gen1 = replace_functions_in_map(&table, &seed(FractalFamily::Hilbert, 8.0)?);

        assert_eq!(gen1.len(), 13);
        assert_eq!(count_all(&["S"], &gen1), 2);
        assert_eq!(
            names(&gen1),
            vec!["S", "T", "B", "D", "T", "A", "D", "A", "T", "D", "B", "T", "S"]
        );
        assert_eq!(gen1[0], Operation::with_arg("S", 0.25));
        assert_eq!(gen1[3], Operation::with_arg("D", 8i64));
        assert_eq!(gen1[12], Operation::with_arg("S", 4i64));
        Ok(())
    }

    #[test]
    fn test_hilbert_fractional_side() -> Result<(), BuildError> {
        let table = hilbert_replacements(2.5)?;
        let a = table.get("A").map(|seq| seq[3].clone());
        assert_eq!(a, Some(Operation::with_arg("D", 2.5)));
        Ok(())
    }

    #[test]
    fn test_seeds() -> Result<(), BuildError> {
        assert_eq!(seed(FractalFamily::Hilbert, 1.0)?.to_string(), "A");
        assert_eq!(seed(FractalFamily::ECurve, 1.0)?.to_string(), "DL:0");
        assert_eq!(seed(FractalFamily::Sierpinski, 1.0)?.to_string(), "DR:0");

        let zigzag = seed(FractalFamily::Zigzag, 3.0)?;
        assert_eq!(count_all(&["DL", "DR"], &zigzag), 4);
        let total_turn: f64 = zigzag
            .iter()
            .filter(|op| op.name == "T")
            .filter_map(|op| op.arg.as_ref().and_then(Arg::as_f64))
            .sum();
        assert_eq!(total_turn, 0.0);
        Ok(())
    }

    #[test]
    fn test_turtle_chain_collapses_turns() {
        assert_eq!(
            turtle_chain("+L--R+", "2", 45.0),
            "T:45|DL:2|T:-90|DR:2|T:45"
        );
        assert_eq!(turtle_chain("L+-R", "1", 60.0), "DL:1|DR:1");
        assert_eq!(turtle_chain("", "1", 60.0), "");
    }

    #[test]
    fn test_sierpinski_rules() -> Result<(), BuildError> {
        let table = sierpinski_replacements(4.0)?;
        let dr = table.get("DR").map(|seq| seq.to_string());
        assert_eq!(
            dr.as_deref(),
            Some("S:0.5|DL:4|T:60|DR:4|T:60|DL:4|S:2")
        );
        let dl = table.get("DL").map(|seq| seq.to_string());
        assert_eq!(
            dl.as_deref(),
            Some("S:0.5|DR:4|T:-60|DL:4|T:-60|DR:4|S:2")
        );
        Ok(())
    }

    #[test]
    fn test_e_curve_rules_draw_25_segments() -> Result<(), BuildError> {
        let table = e_curve_replacements(1.0)?;
        for name in ["DL", "DR"] {
            let rule = table.get(name).cloned().unwrap_or_default();
            assert_eq!(count_all(&["DL", "DR"], &rule), 25, "segments in {}", name);
            assert_eq!(rule.first(), Some(&Operation::with_arg("S", 0.2)));
            assert_eq!(rule.last(), Some(&Operation::with_arg("S", 5i64)));
        }
        Ok(())
    }

    #[test]
    fn test_zigzag_scale_markers_cancel() -> Result<(), BuildError> {
        let table = zigzag_replacements(1.0)?;
        let rule = table.get("DL").cloned().unwrap_or_default();
        let product: f64 = rule
            .iter()
            .filter(|op| op.name == "S")
            .filter_map(|op| op.arg.as_ref().and_then(Arg::as_f64))
            .product();
        assert!((product - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_generic_replaces_d_only() -> Result<(), BuildError> {
        let table = replacements(FractalFamily::Generic, 6.0)?;
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["D"]);

        let gen1 = replace_functions_in_map(&table, &seed(FractalFamily::Generic, 6.0)?);
        assert_eq!(gen1.first(), Some(&Operation::new("C", Some(Arg::Ident("c1".to_string())))));
        Ok(())
    }

    #[test]
    fn test_every_family_builds() -> Result<(), BuildError> {
        for family in FractalFamily::ALL {
            let table = family.replacements(3.0)?;
            assert!(!table.is_empty(), "empty table for {}", family);
            assert!(!family.seed(3.0)?.is_empty(), "empty seed for {}", family);
        }
        Ok(())
    }

    #[test]
    fn test_bad_side_length_rejected() {
        for side in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                replacements(FractalFamily::Hilbert, side),
                Err(BuildError::InvalidParameter {
                    field: "side_length",
                    ..
                })
            ));
        }
    }
}
