use crate::config::WindowConfig;
use chainta_core::{resize, Indicator, IndicatorError, Result, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stochastic Oscillator (%K).
///
/// %K = (Close - Lowest) / (Highest - Lowest) * 100, where Close is the newest
/// point of the window. A flat window yields zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Stoch {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Stoch {
    pub const NAME: &'static str = "stoch";

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
}

impl TryFrom<WindowConfig> for Stoch {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Stoch {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;

        let close = window[window.len() - 1];
        let (lowest, highest) = window
            .iter()
            .fold((close, close), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

        let range = highest - lowest;
        if range.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok((close - lowest) / range * HUNDRED)
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
