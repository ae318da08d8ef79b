use crate::config::WindowConfig;
use chainta_core::{resize, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weighted Moving Average (WMA).
///
/// The i-th point of the window (1-indexed, oldest first) carries weight `i`;
/// the sum is normalised by `length * (length + 1) / 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowConfig")]
pub struct Wma {
    #[serde(skip)]
    valid: bool,
    length: usize,
    offset: usize,
}

impl Wma {
    pub const NAME: &'static str = "wma";

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

/// Linearly weighted mean of the whole slice.
pub(crate) fn weighted_mean(window: &[Decimal]) -> Decimal {
    let n = window.len();
    if n == 0 {
        return Decimal::ZERO;
    }
    let weights = Decimal::from(n * (n + 1)) / Decimal::TWO;
    let sum: Decimal = window
        .iter()
        .enumerate()
        .map(|(i, v)| *v * Decimal::from(i + 1))
        .sum();
    sum / weights
}

impl TryFrom<WindowConfig> for Wma {
    type Error = IndicatorError;

    fn try_from(config: WindowConfig) -> Result<Self> {
        Self::new(config.length()?, config.offset()?)
    }
}

impl Indicator for Wma {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;
        Ok(weighted_mean(window))
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_wma_basic() {
        let wma = Wma::new(3, 0).unwrap();
        let data = [
            dec!(420),
            dec!(420),
            dec!(420),
            dec!(30),
            dec!(30),
            dec!(32),
        ];
        // (30 * 1 + 30 * 2 + 32 * 3) / 6 = 31
        assert_eq!(wma.calc(&data).unwrap(), dec!(31));
    }

    #[test]
    fn test_wma_with_offset() {
        let wma = Wma::new(3, 2).unwrap();
        let data = [dec!(30), dec!(30), dec!(32), dec!(0), dec!(0)];
        assert_eq!(wma.calc(&data).unwrap(), dec!(31));
    }

    #[test]
    fn test_wma_invalid() {
        assert!(matches!(Wma::new(0, 0), Err(IndicatorError::InvalidLength)));
        assert!(matches!(
            Wma::default().calc(&[dec!(1)]),
            Err(IndicatorError::InvalidIndicator)
        ));
        assert!(matches!(
            Wma::new(5, 0).unwrap().calc(&[dec!(30)]),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_wma_count() {
        assert_eq!(Wma::new(15, 2).unwrap().count(), 17);
    }

    #[test]
    fn test_wma_json() {
        let wma = Wma::new(3, 1).unwrap();
        assert_eq!(
            wma.named_value().unwrap(),
            json!({"name": "wma", "length": 3, "offset": 1})
        );
    }
}
