use crate::config::to_offset;
use crate::registry::from_value;
use chainta_core::{resize, Indicator, IndicatorError, Result, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Convergence/Divergence (CD), a generalised MACD.
///
/// Difference between two arbitrary indicators evaluated over the same
/// window, optionally expressed as a percentage of the second one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CdConfig")]
pub struct Cd {
    percent: bool,
    source1: Box<dyn Indicator>,
    source2: Box<dyn Indicator>,
    offset: usize,
}

/// Wire payload for [`Cd`]. Both sources are tagged indicator objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdConfig {
    pub percent: bool,
    pub source1: Option<Value>,
    pub source2: Option<Value>,
    pub offset: i64,
}

impl Cd {
    pub const NAME: &'static str = "cd";

    pub fn new(
        percent: bool,
        source1: Box<dyn Indicator>,
        source2: Box<dyn Indicator>,
        offset: usize,
    ) -> Result<Self> {
        Ok(Self {
            percent,
            source1,
            source2,
            offset,
        })
    }

    /// Classic MACD line: fast EMA minus slow EMA.
    pub fn macd(fast: usize, slow: usize) -> Result<Self> {
        if fast >= slow {
            return Err(IndicatorError::InvalidLength);
        }
        Self::new(
            false,
            Box::new(crate::Ema::new(fast, 0)?),
            Box::new(crate::Ema::new(slow, 0)?),
            0,
        )
    }

    pub fn percent(&self) -> bool {
        self.percent
    }

    pub fn source1(&self) -> &dyn Indicator {
        self.source1.as_ref()
    }

    pub fn source2(&self) -> &dyn Indicator {
        self.source2.as_ref()
    }
}

impl PartialEq for Cd {
    fn eq(&self, other: &Self) -> bool {
        self.percent == other.percent
            && self.offset == other.offset
            && self.source1.equal(other.source1.as_ref())
            && self.source2.equal(other.source2.as_ref())
    }
}

fn required_source(value: Option<Value>) -> Result<Box<dyn Indicator>> {
    match value {
        Some(Value::Null) | None => Err(IndicatorError::InvalidSource),
        Some(value) => from_value(value),
    }
}

impl TryFrom<CdConfig> for Cd {
    type Error = IndicatorError;

    fn try_from(config: CdConfig) -> Result<Self> {
        let source1 = required_source(config.source1)?;
        let source2 = required_source(config.source2)?;
        Self::new(config.percent, source1, source2, to_offset(config.offset)?)
    }
}

impl Indicator for Cd {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        let window = resize(data, self.count().saturating_sub(self.offset), self.offset)?;
        let first = self.source1.calc(window)?;
        let second = self.source2.calc(window)?;

        let diff = first - second;
        if !self.percent {
            return Ok(diff);
        }
        if second.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok(diff / second * HUNDRED)
    }

    fn count(&self) -> usize {
        self.source1
            .count()
            .max(self.source2.count())
            .saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
