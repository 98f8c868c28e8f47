//! Stroke colour tags

use crate::error::StepError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Colour tags used by `C:` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// green
    #[default]
    C1,
    /// yellow
    C2,
    /// purple
    C3,
    /// red
    C4,
}

impl ColorTag {
    pub const ALL: [ColorTag; 4] = [ColorTag::C1, ColorTag::C2, ColorTag::C3, ColorTag::C4];

    /// CSS colour for this tag.
    pub fn palette(&self) -> &'static str {
        match self {
            ColorTag::C1 => "hsl(100,80%,40%)",
            ColorTag::C2 => "hsl(60,90%,40%)",
            ColorTag::C3 => "hsl(280,80%,40%)",
            ColorTag::C4 => "hsl(0,80%,50%)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::C1 => "c1",
            ColorTag::C2 => "c2",
            ColorTag::C3 => "c3",
            ColorTag::C4 => "c4",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c1" => Ok(ColorTag::C1),
            "c2" => Ok(ColorTag::C2),
            "c3" => Ok(ColorTag::C3),
            "c4" => Ok(ColorTag::C4),
            other => Err(StepError::UnknownColor(other.to_string())),
        }
    }
}
