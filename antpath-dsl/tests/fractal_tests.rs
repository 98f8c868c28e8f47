//! Fractal family scenarios: seeds, tables and iterated generations

use antpath_dsl::{
    count_all, create_e_sequence, expand, generations, parse, replace_functions_in_map,
    replacements, seed, FamilyBuilder, FixedJitter, FractalFamily, Operation, RandomJitter,
    DRAW_NAMES,
};
use antpath_core::{AntpathResult, ESequenceParams, RewriteError};
use antpath_test_utils::assertions::assert_names;
use antpath_test_utils::fixtures::fibonacci_table;

#[test]
fn test_hilbert_first_generation_is_authored_a_rule() -> AntpathResult<()> {
    let table = replacements(FractalFamily::Hilbert, 4.0)?;
    let gen1 = replace_functions_in_map(&table, &seed(FractalFamily::Hilbert, 4.0)?);

    assert_eq!(gen1, parse("S:0.25|T:-90|B|D:4|T:90|A|D:4|A|T:90|D:4|B|T:-90|S:4|")?);
    assert_eq!(count_all(&["S"], &gen1), 2);
    assert_eq!(gen1.len() - count_all(&["S"], &gen1), 11);
    Ok(())
}

#[test]
fn test_hilbert_draw_counts_grow_by_four() -> AntpathResult<()> {
    let family = FractalFamily::Hilbert;
    let table = family.replacements(1.0)?;

    let draws: Vec<usize> = generations(&table, family.seed(1.0)?)
        .take(5)
        .map(|g| count_all(&DRAW_NAMES, &g))
        .collect();

    // A Hilbert curve of order n has 4^n - 1 segments.
    assert_eq!(draws, vec![0, 3, 15, 63, 255]);
    Ok(())
}

#[test]
fn test_hilbert_scale_markers_balance() -> AntpathResult<()> {
    let family = FractalFamily::Hilbert;
    let gen3 = expand(&family.replacements(1.0)?, &family.seed(1.0)?, 3, 100_000)?;

    let scale: f64 = gen3
        .iter()
        .filter(|op| op.name == "S")
        .filter_map(|op| op.arg.as_ref().and_then(|arg| arg.as_f64()))
        .product();
    assert_eq!(scale, 1.0);
    Ok(())
}

#[test]
fn test_sierpinski_segments_triple() -> AntpathResult<()> {
    let family = FractalFamily::Sierpinski;
    let table = family.replacements(2.0)?;

    let draws: Vec<usize> = generations(&table, family.seed(2.0)?)
        .take(4)
        .map(|g| count_all(&["DL", "DR"], &g))
        .collect();
    assert_eq!(draws, vec![1, 3, 9, 27]);
    Ok(())
}

#[test]
fn test_e_curve_segments_grow_by_25() -> AntpathResult<()> {
    let family = FractalFamily::ECurve;
    let gen2 = expand(&family.replacements(1.0)?, &family.seed(1.0)?, 2, 100_000)?;
    assert_eq!(count_all(&["DL", "DR"], &gen2), 625);
    Ok(())
}

#[test]
fn test_zigzag_segments_double() -> AntpathResult<()> {
    let family = FractalFamily::Zigzag;
    let gen2 = expand(&family.replacements(1.0)?, &family.seed(1.0)?, 2, 100_000)?;
    assert_eq!(count_all(&["DL", "DR"], &gen2), 16);
    Ok(())
}

#[test]
fn test_expand_limit_reports_generation() -> AntpathResult<()> {
    let family = FractalFamily::ECurve;
    let result = expand(&family.replacements(1.0)?, &family.seed(1.0)?, 3, 10_000);
    assert!(matches!(
        result,
        Err(RewriteError::SequenceTooLong { generation: 3, limit: 10_000, .. })
    ));
    Ok(())
}

#[test]
fn test_fibonacci_fixture_generations() -> AntpathResult<()> {
    let table = fibonacci_table();
    let gen3 = expand(&table, &[Operation::bare("A")], 3, 100)?;
    assert_names(&gen3, &["A", "B", "A", "A", "B"]);
    Ok(())
}

#[test]
fn test_generic_family_with_seeded_jitter() -> AntpathResult<()> {
    let params = ESequenceParams::default();
    let chain = create_e_sequence(&params, &mut RandomJitter::seeded(3))?;
    let fixed = create_e_sequence(&params, &mut FixedJitter(1.0))?;

    let jittered = parse(&chain)?;
    let plain = parse(&fixed)?;
    assert_eq!(jittered.len(), plain.len());
    assert_names(&jittered, &plain.names().collect::<Vec<_>>());
    Ok(())
}
