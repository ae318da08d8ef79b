use crate::config::WindowConfig;
use chainta_core::{mean, resize, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first `length` points of its window, then folded
/// forward one point at a time with multiplier `2 / (length + 1)`. The window
/// is `2 * length - 1` points long so the seed has settled by the newest point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Ema {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Ema {
    pub const NAME: &'static str = "ema";

    pub fn new(length: usize, offset: usize) -> Result<Self> {
        if length < 1 {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(Self {
            valid: true,
            length,
            offset,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn multiplier(&self) -> Decimal {
        Decimal::TWO / Decimal::from(self.length.saturating_add(1))
    }

    /// Next EMA value from the previous EMA value and a new sample.
    pub fn calc_next(&self, previous: Decimal, sample: Decimal) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let m = self.multiplier();
        Ok(sample * m + previous * (Decimal::ONE - m))
    }
}

impl TryFrom<WindowConfig> for Ema {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.count().saturating_sub(self.offset), self.offset)?;
        let (seed, rest) = window.split_at(self.length);

        rest.iter()
            .try_fold(mean(seed), |prev, sample| self.calc_next(prev, *sample))
    }

    fn count(&self) -> usize {
        self.length
            .saturating_mul(2)
            .saturating_add(self.offset)
            .saturating_sub(1)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
