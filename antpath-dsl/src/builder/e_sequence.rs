//! Parametric E-sequence generator
//!
//! Lays out `blocks_per_row * rows` blocks of serpentine bends. Even blocks
//! run along the major length, odd blocks along `2 * bends * minor_length`,
//! and every row ends with a turn-around group.

use crate::parser::parse;
use antpath_core::{check_length, format_number, BuildError, ESequenceParams, Sequence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// JITTER
// ============================================================================

/// Per-block length multiplier.
pub trait Jitter {
    fn multiplier(&mut self) -> f64;
}

/// Always returns the same multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl Default for FixedJitter {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Jitter for FixedJitter {
    fn multiplier(&mut self) -> f64 {
        self.0
    }
}

/// Draws 0.8, 0.9 or 1.0, with 0.9 twice as likely as either end.
#[derive(Debug, Clone)]
pub struct RandomJitter<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    /// Reproducible jitter for tests and configured runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn multiplier(&mut self) -> f64 {
        let step = (2.0 * self.rng.random::<f64>()).round();
        (8.0 + step) / 10.0
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Build the E-sequence chain text.
///
/// The jitter is drawn once per block. It stretches the long segment of
/// even blocks and the short segment of odd blocks.
pub fn create_e_sequence(
    params: &ESequenceParams,
    jitter: &mut impl Jitter,
) -> Result<String, BuildError> {
    params.validate()?;
    let block_count = params.block_count()?;

    let angle = params.start_angle;
    let mut dir = params.dir;
    let mut output = String::new();

    for block in 0..block_count {
        let even_block = block % 2 == 0;
        let jitter = jitter.multiplier();

        let (long_length, short_length) = if even_block {
            (jitter * params.major_length, params.minor_length)
        } else {
            (
                f64::from(params.bends) * 2.0 * params.minor_length,
                jitter * params.minor_length,
            )
        };
        check_length("major_length", long_length)?;
        check_length("minor_length", short_length)?;
        let ll = format_number(long_length);
        let ml = format_number(short_length);

        for _ in 0..params.bends {
            for _ in 0..2 {
                dir = dir.flipped();
                let turn = format_number(dir.sign() * angle);
                output.push_str(&format!("C:c1|D:{ll}|T:{turn}|D:{ml}|T:{turn}|"));
            }
        }

        if even_block {
            output.push_str(&format!(
                "C:c2|D:{}|D2:{}|T:{}|",
                ll,
                format_number(params.minor_length),
                format_number(dir.sign() * angle)
            ));
        }

        if block > 0 && block % params.blocks_per_row == params.blocks_per_row - 1 {
            dir = dir.flipped();
            let turn = format_number(dir.sign() * angle);
            output.push_str(&format!("C:c4|T:{turn}|T:{turn}|D2:{ml}|T:{turn}|"));
        }
    }

    tracing::debug!(
        blocks = block_count,
        bends = params.bends,
        chars = output.len(),
        "created e-sequence"
    );

    Ok(output)
}

/// Build and parse the E-sequence.
pub fn e_sequence(
    params: &ESequenceParams,
    jitter: &mut impl Jitter,
) -> Result<Sequence, BuildError> {
    let chain = create_e_sequence(params, jitter)?;
    parse(&chain).map_err(|source| BuildError::Rule {
        family: "generic".to_string(),
        rule: "E".to_string(),
        source,
    })
}
