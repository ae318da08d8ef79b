use crate::config::{to_length, to_offset};
use chainta_core::{resize, Indicator, IndicatorError, Result, Trend, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aroon Up / Aroon Down.
///
/// Measures how many periods have passed since the newest extreme of the
/// window: the highest point for an up trend, the lowest for a down trend.
/// Ties resolve to the most recent point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AroonConfig")]
pub struct Aroon {
    #[serde(skip)]
    valid: bool,
    trend: Trend,
    length: usize,
    offset: usize,
}

/// Wire payload for [`Aroon`]. The trend travels as `"up"` or `"down"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AroonConfig {
    pub trend: String,
    pub length: i64,
    pub offset: i64,
}

impl Aroon {
    pub const NAME: &'static str = "aroon";

    pub fn new(trend: Trend, length: usize, offset: usize) -> Result<Self> {
        if length < 1 {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(Self {
            valid: true,
            trend,
            length,
            offset,
        })
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl TryFrom<AroonConfig> for Aroon {
    type Error = IndicatorError;

    fn try_from(config: AroonConfig) -> Result<Self> {
        let trend = config.trend.parse()?;
        Self::new(trend, to_length(config.length)?, to_offset(config.offset)?)
    }
}

impl Indicator for Aroon {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;

        let mut extreme: Option<Decimal> = None;
        let mut since = 0;
        for (i, value) in window.iter().enumerate() {
            let replaces = match (extreme, self.trend) {
                (None, _) => true,
                (Some(e), Trend::Up) => e <= *value,
                (Some(e), Trend::Down) => e >= *value,
            };
            if replaces {
                extreme = Some(*value);
                since = self.length - i - 1;
            }
        }

        let length = Decimal::from(self.length);
        Ok((length - Decimal::from(since)) * HUNDRED / length)
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
