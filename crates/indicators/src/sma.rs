use crate::config::WindowConfig;
use chainta_core::{mean, resize, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the `length` points ending `offset` points before the
/// newest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Sma {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Sma {
    pub const NAME: &'static str = "sma";

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

impl TryFrom<WindowConfig> for Sma {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Sma {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;
        Ok(mean(window))
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
