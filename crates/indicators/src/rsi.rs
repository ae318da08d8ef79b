use crate::config::WindowConfig;
use chainta_core::{resize, Indicator, IndicatorError, Result, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Relative Strength Index (RSI).
///
/// Gains and losses are summed over the consecutive changes inside a window of
/// `length` points and averaged by `length`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Rsi {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Rsi {
    pub const NAME: &'static str = "rsi";

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

/// RSI of a single window. No gains gives 0, gains without losses give 100.
pub(crate) fn relative_strength(window: &[Decimal], length: usize) -> Decimal {
    let (gain, loss) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((Decimal::ZERO, Decimal::ZERO), |(gain, loss), change| {
            if change < Decimal::ZERO {
                (gain, loss + change.abs())
            } else {
                (gain + change, loss)
            }
        });

    if gain.is_zero() {
        return Decimal::ZERO;
    }
    if loss.is_zero() {
        return HUNDRED;
    }

    let length = Decimal::from(length);
    let rs = (gain / length) / (loss / length);
    HUNDRED - HUNDRED / (Decimal::ONE + rs)
}

impl TryFrom<WindowConfig> for Rsi {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;
        Ok(relative_strength(window, self.length))
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
