use crate::config::optional_decimal;
use crate::registry::from_value;
use chainta_core::{mean_deviation, resize, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Factor used when none (or zero) is configured.
pub const DEFAULT_FACTOR: Decimal = dec!(0.015);

/// Commodity Channel Index (CCI).
///
/// CCI = (Latest - Source) / (Factor * MeanDeviation), where Source is any
/// indicator evaluated over the same window (typically an SMA). A zero
/// denominator yields zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CciConfig")]
pub struct Cci {
    source: Box<dyn Indicator>,
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    factor: Decimal,
}

/// Wire payload for [`Cci`]. `source` is any tagged indicator object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CciConfig {
    pub source: Option<Value>,
    #[serde(deserialize_with = "optional_decimal")]
    pub factor: Option<Decimal>,
}

impl Cci {
    pub const NAME: &'static str = "cci";

    /// A zero factor selects [`DEFAULT_FACTOR`].
    pub fn new(source: Box<dyn Indicator>, factor: Decimal) -> Result<Self> {
        let factor = if factor.is_zero() { DEFAULT_FACTOR } else { factor };
        if factor < Decimal::ZERO {
            return Err(IndicatorError::InvalidFactor);
        }
        Ok(Self { source, factor })
    }

    pub fn source(&self) -> &dyn Indicator {
        self.source.as_ref()
    }

    pub fn factor(&self) -> Decimal {
        self.factor
    }
}

impl PartialEq for Cci {
    fn eq(&self, other: &Self) -> bool {
        self.factor == other.factor && self.source.equal(other.source.as_ref())
    }
}

impl TryFrom<CciConfig> for Cci {
    type Error = IndicatorError;

    fn try_from(config: CciConfig) -> Result<Self> {
        let source = match config.source {
            Some(Value::Null) | None => return Err(IndicatorError::InvalidSource),
            Some(source) => from_value(source)?,
        };
        Self::new(source, config.factor.unwrap_or_default())
    }
}

impl Indicator for Cci {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        let window = resize(data, self.count(), 0)?;
        let typical = self.source.calc(window)?;

        let recent = &window[..window.len().saturating_sub(self.source.offset())];
        let Some(latest) = recent.last() else {
            return Err(IndicatorError::InsufficientData {
                required: self.count().saturating_add(1),
                available: data.len(),
            });
        };

        let denom = self.factor * mean_deviation(recent);
        if denom.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok((*latest - typical) / denom)
    }

    fn count(&self) -> usize {
        self.source.count()
    }

    fn offset(&self) -> usize {
        self.source.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ema, Sma};
    use serde_json::json;

    fn sma(length: usize, offset: usize) -> Box<dyn Indicator> {
        Box::new(Sma::new(length, offset).unwrap())
    }

    #[test]
    fn test_cci_basic() {
        let cci = Cci::new(sma(3, 0), Decimal::ZERO).unwrap();
        assert_eq!(cci.factor(), dec!(0.015));
        // (9 - 6) / (0.015 * 2)
        assert_eq!(cci.calc(&[dec!(3), dec!(6), dec!(9)]).unwrap(), dec!(100));
    }

    #[test]
    fn test_cci_custom_factor() {
        let cci = Cci::new(sma(3, 0), dec!(1)).unwrap();
        assert_eq!(cci.calc(&[dec!(1), dec!(3), dec!(6), dec!(9)]).unwrap(), dec!(1.5));
    }

    #[test]
    fn test_cci_zero_deviation() {
        let cci = Cci::new(sma(3, 0), Decimal::ZERO).unwrap();
        assert_eq!(cci.calc(&[dec!(5), dec!(5), dec!(5)]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_cci_source_offset() {
        let cci = Cci::new(sma(3, 2), dec!(1)).unwrap();
        assert_eq!(cci.count(), 5);
        assert_eq!(cci.offset(), 2);
        let data = [dec!(3), dec!(6), dec!(9), dec!(100), dec!(-100)];
        assert_eq!(cci.calc(&data).unwrap(), dec!(1.5));
    }

    #[test]
    fn test_cci_eq_compares_source_and_factor() {
        let a = Cci::new(sma(3, 0), Decimal::ZERO).unwrap();
        assert_eq!(a, Cci::new(sma(3, 0), DEFAULT_FACTOR).unwrap());
        assert_ne!(a, Cci::new(sma(3, 1), DEFAULT_FACTOR).unwrap());
        assert_ne!(a, Cci::new(Box::new(Ema::new(3, 0).unwrap()), DEFAULT_FACTOR).unwrap());
        assert_ne!(a, Cci::new(sma(3, 0), dec!(0.02)).unwrap());
    }

    #[test]
    fn test_cci_invalid() {
        assert!(matches!(
            Cci::new(sma(3, 0), dec!(-1)),
            Err(IndicatorError::InvalidFactor)
        ));
        assert!(matches!(
            Cci::new(sma(3, 0), Decimal::ZERO).unwrap().calc(&[dec!(1)]),
            Err(IndicatorError::InsufficientData { required: 3, available: 1 })
        ));
        assert!(matches!(
            Cci::try_from(CciConfig::default()),
            Err(IndicatorError::InvalidSource)
        ));
    }

    #[test]
    fn test_cci_config() {
        let config: CciConfig = serde_json::from_value(json!({
            "source": {"name": "ema", "length": 3},
            "factor": ""
        }))
        .unwrap();
        let cci = Cci::try_from(config).unwrap();
        assert_eq!(cci.factor(), DEFAULT_FACTOR);
        assert!(cci.source().equal(&Ema::new(3, 0).unwrap()));
    }

    #[test]
    fn test_cci_json() {
        let cci = Cci::new(sma(20, 0), Decimal::ZERO).unwrap();
        assert_eq!(
            cci.named_value().unwrap(),
            json!({
                "name": "cci",
                "source": {"name": "sma", "length": 20, "offset": 0},
                "factor": "0.015"
            })
        );
    }
}
