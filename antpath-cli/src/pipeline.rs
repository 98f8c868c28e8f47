//! Generate and walk: the work behind the `generate` and `walk` commands

use antpath_core::{
    count_all, AntpathResult, FractalFamily, GeneratorConfig, ReplacementTable, Sequence,
};
use antpath_dsl::{
    expand, generic_replacements, replacements, seed, FixedJitter, RandomJitter, DRAW_NAMES,
};
use antpath_walker::{ant_function_map, Ant, StepArgs, Walker};
use serde::Serialize;

/// Replacement table for the configured family.
///
/// The generic family takes its E-sequence from the configuration, jittered
/// by a seeded RNG when `jitter_seed` is set.
pub fn build_table(config: &GeneratorConfig) -> AntpathResult<ReplacementTable> {
    let table = match (config.family, config.jitter_seed) {
        (FractalFamily::Generic, Some(jitter_seed)) => {
            generic_replacements(&config.e_sequence, &mut RandomJitter::seeded(jitter_seed))?
        }
        (FractalFamily::Generic, None) => {
            generic_replacements(&config.e_sequence, &mut FixedJitter::default())?
        }
        (family, _) => replacements(family, config.side_length)?,
    };
    Ok(table)
}

/// Seed, table and `effective_iterations()` rewrite passes.
pub fn generate(config: &GeneratorConfig) -> AntpathResult<Sequence> {
    let seed = seed(config.family, config.side_length)?;
    let table = build_table(config)?;
    let depth = config.effective_iterations();

    let sequence = expand(&table, &seed, depth, config.max_operations)?;

    tracing::info!(
        family = %config.family,
        iterations = depth,
        rules = table.len(),
        operations = sequence.len(),
        draws = count_all(&DRAW_NAMES, &sequence),
        "sequence generated"
    );

    Ok(sequence)
}

/// Where the ant ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkReport {
    pub position: (i64, i64),
    pub heading: f64,
    /// Cells visited, including the start.
    pub path_length: usize,
    pub steps: usize,
    pub moves: usize,
    pub skipped: usize,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WalkOptions {
    pub max_life: Option<usize>,
    pub distance: Option<f64>,
}

/// Run a fresh ant at the origin over `sequence`.
pub fn walk(sequence: Sequence, options: WalkOptions) -> (Ant, WalkReport) {
    let mut ant = match options.max_life {
        Some(max_life) => Ant::default().with_max_life(max_life),
        None => Ant::default(),
    };

    let mut walker = Walker::new(ant_function_map(), sequence).with_step_args(StepArgs {
        distance: options.distance,
    });
    let summary = walker.run_to_end(&mut ant);

    let report = WalkReport {
        position: ant.position(),
        heading: ant.angle,
        path_length: ant.path.len(),
        steps: summary.steps,
        moves: summary.moves,
        skipped: summary.skipped,
        alive: ant.alive,
    };

    tracing::info!(
        x = report.position.0,
        y = report.position.1,
        path_length = report.path_length,
        skipped = report.skipped,
        "walk complete"
    );

    (ant, report)
}
