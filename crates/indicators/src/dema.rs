use crate::config::{typed_source, WindowConfig};
use crate::ema::Ema;
use chainta_core::{mean, resize, serialize_named, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Double Exponential Moving Average (DEMA).
///
/// Builds one EMA value per sliding position of the inner EMA's window, then
/// EMA-folds that derived series once more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DemaConfig")]
pub struct Dema {
    #[serde(skip)]
    valid: bool,
    #[serde(serialize_with = "serialize_named")]
    ema: Ema,
}

/// Wire payload for [`Dema`]: the nested EMA object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemaConfig {
    pub ema: Option<Value>,
}

impl Dema {
    pub const NAME: &'static str = "dema";

    pub fn new(ema: Ema) -> Result<Self> {
        if !ema.is_valid() {
            return Err(IndicatorError::InvalidSource);
        }
        Ok(Self { valid: true, ema })
    }

    pub fn ema(&self) -> Ema {
        self.ema
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl TryFrom<DemaConfig> for Dema {
    type Error = IndicatorError;

    fn try_from(config: DemaConfig) -> Result<Self> {
        let ema = typed_source::<WindowConfig>(config.ema, Ema::NAME)?;
        Self::new(Ema::try_from(ema)?)
    }
}

impl Indicator for Dema {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let offset = self.ema.offset();
        let window = resize(data, self.count().saturating_sub(offset), offset)?;
        let (seed, rest) = window.split_at(self.ema.length());

        let mut series = Vec::with_capacity(self.ema.length());
        series.push(mean(seed));
        for sample in rest {
            let previous = series[series.len() - 1];
            series.push(self.ema.calc_next(previous, *sample)?);
        }

        series
            .iter()
            .try_fold(series[0], |prev, value| self.ema.calc_next(prev, *value))
    }

    fn count(&self) -> usize {
        self.ema.count()
    }

    fn offset(&self) -> usize {
        self.ema.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_dema_basic() {
        let dema = Dema::new(Ema::new(3, 0).unwrap()).unwrap();
        let data = [dec!(30), dec!(31), dec!(1), dec!(1), dec!(2), dec!(3)];
        assert_eq!(dema.calc(&data).unwrap(), dec!(6.75));
    }

    #[test]
    fn test_dema_with_offset() {
        let dema = Dema::new(Ema::new(3, 2).unwrap()).unwrap();
        let data = [
            dec!(30),
            dec!(31),
            dec!(1),
            dec!(1),
            dec!(2),
            dec!(3),
            dec!(500),
            dec!(500),
        ];
        assert_eq!(dema.calc(&data).unwrap(), dec!(6.75));
        assert_eq!(dema.offset(), 2);
        assert_eq!(dema.count(), 7);
    }

    #[test]
    fn test_dema_invalid() {
        assert!(matches!(
            Dema::new(Ema::default()),
            Err(IndicatorError::InvalidSource)
        ));
        assert!(matches!(
            Dema::default().calc(&[dec!(1); 10]),
            Err(IndicatorError::InvalidIndicator)
        ));
        assert!(matches!(
            Dema::new(Ema::new(3, 0).unwrap()).unwrap().calc(&[dec!(1); 4]),
            Err(IndicatorError::InsufficientData { required: 5, available: 4 })
        ));
    }

    #[test]
    fn test_dema_config() {
        let dema: Dema = serde_json::from_value(json!({"ema": {"length": 3, "offset": 1}})).unwrap();
        assert_eq!(dema.ema(), Ema::new(3, 1).unwrap());

        let err = serde_json::from_value::<Dema>(json!({"ema": {"length": 0}})).unwrap_err();
        assert!(err.to_string().contains("Invalid length"));

        assert!(matches!(
            Dema::try_from(DemaConfig::default()),
            Err(IndicatorError::InvalidSource)
        ));
    }

    #[test]
    fn test_dema_json() {
        let dema = Dema::new(Ema::new(3, 0).unwrap()).unwrap();
        assert_eq!(
            dema.named_value().unwrap(),
            json!({"name": "dema", "ema": {"name": "ema", "length": 3, "offset": 0}})
        );
    }
}
