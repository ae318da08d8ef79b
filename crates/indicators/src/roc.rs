use crate::config::WindowConfig;
use chainta_core::{resize, Indicator, IndicatorError, Result, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate of Change (ROC).
///
/// Percentage change between the newest point of the window and the oldest
/// one, `length - 1` steps back. A zero lagging value yields zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Roc {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Roc {
    pub const NAME: &'static str = "roc";

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

impl TryFrom<WindowConfig> for Roc {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Roc {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;
        let newest = window[window.len() - 1];
        let lagging = window[0];

        if lagging.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok((newest - lagging) / lagging * HUNDRED)
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
