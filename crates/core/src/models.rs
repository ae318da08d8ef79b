use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Which extreme an Aroon indicator tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Most recent high.
    #[default]
    Up,
    /// Most recent low.
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Trend::Up),
            "down" => Ok(Trend::Down),
            other => Err(IndicatorError::InvalidTrend(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// Which Bollinger band is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Upper,
    #[default]
    Middle,
    Lower,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Upper => "upper",
            Band::Middle => "middle",
            Band::Lower => "lower",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Band::Upper),
            "middle" => Ok(Band::Middle),
            "lower" => Ok(Band::Lower),
            other => Err(IndicatorError::InvalidBand(other.to_string())),
        }
    }
}
