use crate::config::{typed_source, WindowConfig};
use crate::wma::{weighted_mean, Wma};
use chainta_core::{resize, serialize_named, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hull Moving Average (HMA).
///
/// HMA = WMA(2 * WMA(n / 2) - WMA(n), floor(sqrt(n))), where the inner
/// difference is evaluated at the last `floor(sqrt(n))` window positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "HmaConfig")]
pub struct Hma {
    #[serde(skip)]
    valid: bool,
    #[serde(serialize_with = "serialize_named")]
    wma: Wma,
}

/// Wire payload for [`Hma`]: the nested WMA object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmaConfig {
    pub wma: Option<Value>,
}

impl Hma {
    pub const NAME: &'static str = "hma";

    pub fn new(wma: Wma) -> Result<Self> {
        if !wma.is_valid() {
            return Err(IndicatorError::InvalidSource);
        }
        if wma.length() < 2 {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(Self { valid: true, wma })
    }

    pub fn wma(&self) -> Wma {
        self.wma
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Integer square root, rounded down.
fn floor_sqrt(value: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}

impl TryFrom<HmaConfig> for Hma {
    type Error = IndicatorError;

    fn try_from(config: HmaConfig) -> Result<Self> {
        let wma = typed_source::<WindowConfig>(config.wma, Wma::NAME)?;
        Self::new(Wma::try_from(wma)?)
    }
}

impl Indicator for Hma {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let offset = self.wma.offset();
        let window = resize(data, self.count().saturating_sub(offset), offset)?;

        let length = self.wma.length();
        let half = length / 2;
        let root = floor_sqrt(length);

        let series: Vec<Decimal> = (0..root)
            .map(|i| {
                let slice = &window[..window.len() - root + i + 1];
                let fast = weighted_mean(&slice[slice.len() - half..]);
                let slow = weighted_mean(&slice[slice.len() - length..]);
                Decimal::TWO * fast - slow
            })
            .collect();

        Ok(weighted_mean(&series))
    }

    fn count(&self) -> usize {
        // 2 * wma.count() - offset - 1
        self.wma
            .length()
            .saturating_mul(2)
            .saturating_add(self.wma.offset())
            .saturating_sub(1)
    }

    fn offset(&self) -> usize {
        self.wma.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_floor_sqrt() {
        assert_eq!(floor_sqrt(0), 0);
        assert_eq!(floor_sqrt(3), 1);
        assert_eq!(floor_sqrt(4), 2);
        assert_eq!(floor_sqrt(15), 3);
        assert_eq!(floor_sqrt(16), 4);
    }

    #[test]
    fn test_hma_basic() {
        let hma = Hma::new(Wma::new(3, 0).unwrap()).unwrap();
        // 2 * WMA([31]) - WMA([30, 30, 31]) = 62 - 30.5
        let data = [dec!(30), dec!(31), dec!(32), dec!(30), dec!(30), dec!(31)];
        assert_eq!(hma.calc(&data).unwrap(), dec!(31.5));
    }

    #[test]
    fn test_hma_with_offset() {
        let hma = Hma::new(Wma::new(3, 1).unwrap()).unwrap();
        let data = [dec!(31), dec!(32), dec!(30), dec!(30), dec!(31), dec!(7)];
        assert_eq!(hma.count(), 6);
        assert_eq!(hma.calc(&data).unwrap(), dec!(31.5));
    }

    #[test]
    fn test_hma_longer_window() {
        // constant input stays constant
        let hma = Hma::new(Wma::new(4, 0).unwrap()).unwrap();
        assert_eq!(hma.calc(&[dec!(12); 7]).unwrap(), dec!(12));
    }

    #[test]
    fn test_hma_count() {
        let hma = Hma::new(Wma::new(15, 2).unwrap()).unwrap();
        assert_eq!(hma.count(), 31);
        assert_eq!(hma.offset(), 2);
    }

    #[test]
    fn test_hma_huge_length_saturates() {
        let hma = Hma::new(Wma::new(usize::MAX, 1).unwrap()).unwrap();
        assert_eq!(hma.count(), usize::MAX - 1);
        assert!(matches!(
            hma.calc(&[dec!(1)]),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_hma_huge_offset_saturates() {
        let hma = Hma::new(Wma::new(3, usize::MAX).unwrap()).unwrap();
        assert_eq!(hma.count(), usize::MAX - 1);
        assert!(matches!(
            hma.calc(&[dec!(1); 6]),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_hma_invalid() {
        assert!(matches!(
            Hma::new(Wma::default()),
            Err(IndicatorError::InvalidSource)
        ));
        assert!(matches!(
            Hma::new(Wma::new(1, 0).unwrap()),
            Err(IndicatorError::InvalidLength)
        ));
        assert!(matches!(
            Hma::default().calc(&[dec!(1); 10]),
            Err(IndicatorError::InvalidIndicator)
        ));
        assert!(matches!(
            Hma::new(Wma::new(3, 0).unwrap()).unwrap().calc(&[dec!(1); 4]),
            Err(IndicatorError::InsufficientData { required: 5, available: 4 })
        ));
    }

    #[test]
    fn test_hma_json() {
        let hma = Hma::new(Wma::new(9, 0).unwrap()).unwrap();
        let value = hma.named_value().unwrap();
        assert_eq!(
            value,
            json!({"name": "hma", "wma": {"name": "wma", "length": 9, "offset": 0}})
        );

        let decoded: Hma = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, hma);
    }
}
