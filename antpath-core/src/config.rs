//! Configuration types
//!
//! Defaults mirror the values the ant sketches were tuned with. A TOML file
//! may override any subset of fields; unknown keys are rejected.

use crate::error::{BuildError, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FRACTAL FAMILIES
// ============================================================================

/// Curve families with a seed sequence and a replacement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FractalFamily {
    #[default]
    Hilbert,
    /// McKenna's E-curve (quadratic Gosper curve)
    ECurve,
    /// Sierpinski arrowhead curve
    Sierpinski,
    Zigzag,
    /// Parametric E-sequence driven by [`ESequenceParams`]
    Generic,
}

impl FractalFamily {
    pub const ALL: [FractalFamily; 5] = [
        FractalFamily::Hilbert,
        FractalFamily::ECurve,
        FractalFamily::Sierpinski,
        FractalFamily::Zigzag,
        FractalFamily::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FractalFamily::Hilbert => "hilbert",
            FractalFamily::ECurve => "ecurve",
            FractalFamily::Sierpinski => "sierpinski",
            FractalFamily::Zigzag => "zigzag",
            FractalFamily::Generic => "generic",
        }
    }

    /// Rewrite depth the sketches used for this family.
    pub fn default_iterations(&self) -> usize {
        match self {
            FractalFamily::Hilbert => 4,
            FractalFamily::ECurve => 1,
            FractalFamily::Sierpinski => 6,
            FractalFamily::Zigzag => 2,
            FractalFamily::Generic => 1,
        }
    }
}

impl fmt::Display for FractalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FractalFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hilbert" => Ok(FractalFamily::Hilbert),
            "ecurve" | "e-curve" => Ok(FractalFamily::ECurve),
            "sierpinski" | "arrowhead" => Ok(FractalFamily::Sierpinski),
            "zigzag" => Ok(FractalFamily::Zigzag),
            "generic" | "esequence" => Ok(FractalFamily::Generic),
            _ => Err(ConfigError::UnknownFamily(s.to_string())),
        }
    }
}

// ============================================================================
// E-SEQUENCE PARAMETERS
// ============================================================================

/// Initial turn direction of the E-sequence generator. Serialized as -1 / 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum TurnDirection {
    Negative,
    Positive,
}

impl TurnDirection {
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Negative => -1.0,
            TurnDirection::Positive => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            TurnDirection::Negative => TurnDirection::Positive,
            TurnDirection::Positive => TurnDirection::Negative,
        }
    }
}

impl TryFrom<i8> for TurnDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(TurnDirection::Negative),
            1 => Ok(TurnDirection::Positive),
            other => Err(format!("direction must be -1 or 1, got {}", other)),
        }
    }
}

impl From<TurnDirection> for i8 {
    fn from(dir: TurnDirection) -> Self {
        match dir {
            TurnDirection::Negative => -1,
            TurnDirection::Positive => 1,
        }
    }
}

/// Structural parameters of the parametric E-sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ESequenceParams {
    pub bends: u32,
    /// Must be even.
    pub blocks_per_row: u32,
    pub rows: u32,
    pub major_length: f64,
    pub minor_length: f64,
    pub dir: TurnDirection,
    /// Turn angle in degrees.
    pub start_angle: f64,
}

impl Default for ESequenceParams {
    fn default() -> Self {
        Self {
            bends: 4,
            blocks_per_row: 4,
            rows: 1,
            major_length: 96.0,
            minor_length: 48.0,
            dir: TurnDirection::Negative,
            start_angle: 90.0,
        }
    }
}

impl ESequenceParams {
    /// Compact two-by-two layout sized from a single side length.
    pub fn scaled(side_length: f64) -> Self {
        Self {
            bends: 2,
            blocks_per_row: 2,
            rows: 2,
            major_length: side_length,
            minor_length: side_length / 2.0,
            dir: TurnDirection::Negative,
            start_angle: 90.0,
        }
    }

    pub fn block_count(&self) -> Result<u32, BuildError> {
        self.blocks_per_row
            .checked_mul(self.rows)
            .ok_or_else(|| BuildError::InvalidParameter {
                field: "rows",
                reason: format!(
                    "{} rows of {} blocks overflow the block count",
                    self.rows, self.blocks_per_row
                ),
            })
    }

    /// Number of operations the generated E-sequence contains.
    ///
    /// Every block draws `10 * bends` operations, even blocks add a
    /// four-operation tail, and each row ends with a five-operation
    /// transition.
    pub fn operation_count(&self) -> Result<usize, BuildError> {
        let blocks = u64::from(self.block_count()?);
        u64::from(self.bends)
            .checked_mul(10)
            .and_then(|per_block| per_block.checked_add(2))
            .and_then(|per_block| per_block.checked_mul(blocks))
            .and_then(|total| total.checked_add(5 * u64::from(self.rows)))
            .and_then(|total| usize::try_from(total).ok())
            .ok_or_else(|| BuildError::InvalidParameter {
                field: "bends",
                reason: format!(
                    "{} bends over {} blocks overflow the operation count",
                    self.bends, blocks
                ),
            })
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.bends == 0 {
            return Err(BuildError::InvalidParameter {
                field: "bends",
                reason: "must be > 0".to_string(),
            });
        }
        if self.blocks_per_row == 0 || self.blocks_per_row % 2 != 0 {
            return Err(BuildError::InvalidParameter {
                field: "blocks_per_row",
                reason: format!("must be even and > 0, got {}", self.blocks_per_row),
            });
        }
        if self.rows == 0 {
            return Err(BuildError::InvalidParameter {
                field: "rows",
                reason: "must be > 0".to_string(),
            });
        }
        check_length("major_length", self.major_length)?;
        check_length("minor_length", self.minor_length)?;
        if !self.start_angle.is_finite() {
            return Err(BuildError::InvalidParameter {
                field: "start_angle",
                reason: "must be finite".to_string(),
            });
        }
        // Turns are emitted with both signs and -0.x is not a chain number.
        if self.start_angle != 0.0 && self.start_angle.abs() < 1.0 {
            return Err(BuildError::InvalidParameter {
                field: "start_angle",
                reason: format!("must be 0 or at least 1 in magnitude, got {}", self.start_angle),
            });
        }
        if self.start_angle.abs() > MAX_LENGTH {
            return Err(BuildError::InvalidParameter {
                field: "start_angle",
                reason: format!("must be at most {} in magnitude", format_limit()),
            });
        }
        self.operation_count()?;
        Ok(())
    }
}

/// Largest length a builder accepts. Integral lengths are written as
/// integer literals, which must stay inside `i64`.
pub const MAX_LENGTH: f64 = 1.0e15;

fn format_limit() -> String {
    format!("{:.0}", MAX_LENGTH)
}

/// Reject lengths that would not format as a grammar number.
pub fn check_length(field: &'static str, value: f64) -> Result<(), BuildError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BuildError::InvalidParameter {
            field,
            reason: format!("must be finite and > 0, got {}", value),
        });
    }
    if value > MAX_LENGTH {
        return Err(BuildError::InvalidParameter {
            field,
            reason: format!("must be at most {}, got {}", format_limit(), value),
        });
    }
    Ok(())
}

// ============================================================================
// GENERATOR CONFIG
// ============================================================================

/// Settings for one generate-and-iterate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub family: FractalFamily,
    pub side_length: f64,
    /// Number of rewrite passes applied to the seed. Unset uses the
    /// family's default depth.
    pub iterations: Option<usize>,
    /// Upper bound on the length of any generation.
    pub max_operations: usize,
    pub e_sequence: ESequenceParams,
    /// Seed for the E-sequence jitter. `None` uses a fixed unit multiplier.
    pub jitter_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            family: FractalFamily::Hilbert,
            side_length: 1.0,
            iterations: None,
            max_operations: 1_000_000,
            e_sequence: ESequenceParams::default(),
            jitter_seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn effective_iterations(&self) -> usize {
        self.iterations
            .unwrap_or_else(|| self.family.default_iterations())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length("side_length", self.side_length).map_err(|err| {
            ConfigError::InvalidValue {
                field: "side_length",
                reason: err.to_string(),
            }
        })?;
        if self.max_operations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_operations",
                reason: "must be > 0".to_string(),
            });
        }
        self.e_sequence
            .validate()
            .map_err(|err| ConfigError::InvalidValue {
                field: "e_sequence",
                reason: err.to_string(),
            })?;

        if self.family == FractalFamily::Generic {
            let length = self
                .e_sequence
                .operation_count()
                .map_err(|err| ConfigError::InvalidValue {
                    field: "e_sequence",
                    reason: err.to_string(),
                })?;
            if length > self.max_operations {
                return Err(ConfigError::InvalidValue {
                    field: "e_sequence",
                    reason: format!(
                        "generates {} operations, more than max_operations ({})",
                        length, self.max_operations
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_str_roundtrip() {
        for family in FractalFamily::ALL {
            let parsed: FractalFamily = family.to_string().parse().unwrap();
            assert_eq!(parsed, family);
        }
        assert_eq!(
            "Arrowhead".parse::<FractalFamily>().unwrap(),
            FractalFamily::Sierpinski
        );
        assert!(matches!(
            "koch".parse::<FractalFamily>(),
            Err(ConfigError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_turn_direction_conversions() {
        assert_eq!(TurnDirection::try_from(-1), Ok(TurnDirection::Negative));
        assert_eq!(TurnDirection::try_from(1), Ok(TurnDirection::Positive));
        assert!(TurnDirection::try_from(0).is_err());
        assert_eq!(TurnDirection::Negative.flipped(), TurnDirection::Positive);
        assert_eq!(i8::from(TurnDirection::Positive), 1);
    }

    #[test]
    fn test_e_sequence_validation() {
        assert!(ESequenceParams::default().validate().is_ok());

        let odd = ESequenceParams {
            blocks_per_row: 3,
            ..ESequenceParams::default()
        };
        assert!(matches!(
            odd.validate(),
            Err(BuildError::InvalidParameter {
                field: "blocks_per_row",
                ..
            })
        ));

        let zero_length = ESequenceParams {
            minor_length: 0.0,
            ..ESequenceParams::default()
        };
        assert!(zero_length.validate().is_err());
    }

    #[test]
    fn test_scaled_params() {
        let params = ESequenceParams::scaled(6.0);
        assert_eq!(params.major_length, 6.0);
        assert_eq!(params.minor_length, 3.0);
        assert_eq!(params.block_count(), Ok(4));
        assert_eq!(params.operation_count(), Ok(98));
    }

    #[test]
    fn test_operation_count_matches_default_layout() {
        assert_eq!(ESequenceParams::default().operation_count(), Ok(173));
    }

    #[test]
    fn test_block_count_overflow_rejected() {
        let params = ESequenceParams {
            bends: 1,
            blocks_per_row: 65536,
            rows: 65536,
            ..ESequenceParams::default()
        };
        assert!(matches!(
            params.block_count(),
            Err(BuildError::InvalidParameter { field: "rows", .. })
        ));
        assert!(params.validate().is_err());

        let params = ESequenceParams {
            bends: u32::MAX,
            blocks_per_row: 65534,
            rows: 65535,
            ..ESequenceParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(BuildError::InvalidParameter { field: "bends", .. })
        ));
    }

    #[test]
    fn test_generic_config_bounded_by_max_operations() {
        let config = GeneratorConfig {
            family: FractalFamily::Generic,
            max_operations: 1000,
            e_sequence: ESequenceParams {
                bends: 100_000,
                ..ESequenceParams::default()
            },
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "e_sequence",
                ..
            })
        ));

        // Other families never build the E-sequence.
        let hilbert = GeneratorConfig {
            family: FractalFamily::Hilbert,
            ..config.clone()
        };
        assert!(hilbert.validate().is_ok());
    }

    #[test]
    fn test_lengths_bounded_above() {
        assert!(check_length("side_length", 1.0e15).is_ok());
        assert!(matches!(
            check_length("side_length", 1.0e19),
            Err(BuildError::InvalidParameter {
                field: "side_length",
                ..
            })
        ));

        let config = GeneratorConfig {
            side_length: 1.0e19,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "side_length",
                ..
            })
        ));
    }

    #[test]
    fn test_fractional_start_angle_rejected() {
        for start_angle in [0.5, -0.25] {
            let params = ESequenceParams {
                start_angle,
                ..ESequenceParams::default()
            };
            assert!(matches!(
                params.validate(),
                Err(BuildError::InvalidParameter {
                    field: "start_angle",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: GeneratorConfig = toml::from_str(
            r#"
            family = "sierpinski"
            iterations = 6

            [e_sequence]
            bends = 2
            dir = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.family, FractalFamily::Sierpinski);
        assert_eq!(config.iterations, Some(6));
        assert_eq!(config.effective_iterations(), 6);
        assert_eq!(config.side_length, 1.0);
        assert_eq!(config.e_sequence.bends, 2);
        assert_eq!(config.e_sequence.dir, TurnDirection::Positive);
        assert_eq!(config.e_sequence.blocks_per_row, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_iterations_follow_family() {
        let config = GeneratorConfig {
            family: FractalFamily::Sierpinski,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.effective_iterations(), 6);
        assert_eq!(GeneratorConfig::default().effective_iterations(), 4);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let result: Result<GeneratorConfig, _> = toml::from_str("colour = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = GeneratorConfig {
            side_length: -1.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "side_length",
                ..
            })
        ));
    }
}
