use crate::config::{typed_source, WindowConfig};
use crate::rsi::{relative_strength, Rsi};
use chainta_core::{resize, serialize_named, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stochastic RSI (SRSI).
///
/// Computes `length` consecutive RSI values and places the newest one within
/// their range: `(latest - min) / (max - min)`. A flat run yields zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SrsiConfig")]
pub struct Srsi {
    #[serde(skip)]
    valid: bool,
    #[serde(serialize_with = "serialize_named")]
    rsi: Rsi,
}

/// Wire payload for [`Srsi`]: the nested RSI object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrsiConfig {
    pub rsi: Option<Value>,
}

impl Srsi {
    pub const NAME: &'static str = "srsi";

    pub fn new(rsi: Rsi) -> Result<Self> {
        if !rsi.is_valid() {
            return Err(IndicatorError::InvalidSource);
        }
        Ok(Self { valid: true, rsi })
    }

    pub fn rsi(&self) -> Rsi {
        self.rsi
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl TryFrom<SrsiConfig> for Srsi {
    type Error = IndicatorError;

    fn try_from(config: SrsiConfig) -> Result<Self> {
        let rsi = typed_source::<WindowConfig>(config.rsi, Rsi::NAME)?;
        Self::new(Rsi::try_from(rsi)?)
    }
}

impl Indicator for Srsi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let offset = self.rsi.offset();
        let length = self.rsi.length();
        let window = resize(data, self.count().saturating_sub(offset), offset)?;

        let values: Vec<Decimal> = window
            .windows(length)
            .map(|w| relative_strength(w, length))
            .collect();

        let latest = values[values.len() - 1];
        let (lowest, highest) = values
            .iter()
            .fold((latest, latest), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

        let range = highest - lowest;
        if range.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok((latest - lowest) / range)
    }

    fn count(&self) -> usize {
        self.rsi
            .length()
            .saturating_mul(2)
            .saturating_add(self.rsi.offset())
            .saturating_sub(1)
    }

    fn offset(&self) -> usize {
        self.rsi.offset()
    }
}
