use crate::config::{optional_decimal, to_length, to_offset};
use chainta_core::{mean, resize, std_dev, Band, Indicator, IndicatorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bollinger Bands.
///
/// The middle band is the SMA of the window; the upper and lower bands sit
/// `standard_deviations` population standard deviations above and below it.
/// One instance reports one band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BollingerConfig")]
pub struct BollingerBands {
    #[serde(skip)]
    valid: bool,
    band: Band,
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    standard_deviations: Decimal,
    length: usize,
    offset: usize,
}

/// Wire payload for [`BollingerBands`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub band: String,
    #[serde(deserialize_with = "optional_decimal")]
    pub standard_deviations: Option<Decimal>,
    pub length: i64,
    pub offset: i64,
}

impl BollingerBands {
    pub const NAME: &'static str = "bb";

    pub fn new(band: Band, standard_deviations: Decimal, length: usize, offset: usize) -> Result<Self> {
        if length < 1 {
            return Err(IndicatorError::InvalidLength);
        }
        if standard_deviations < Decimal::ZERO {
            return Err(IndicatorError::InvalidStandardDeviations);
        }
        Ok(Self {
            valid: true,
            band,
            standard_deviations,
            length,
            offset,
        })
    }

    /// Standard Bollinger Bands (20, 2).
    pub fn default_periods(band: Band) -> Result<Self> {
        Self::new(band, Decimal::TWO, 20, 0)
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn standard_deviations(&self) -> Decimal {
        self.standard_deviations
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl TryFrom<BollingerConfig> for BollingerBands {
    type Error = IndicatorError;

    fn try_from(config: BollingerConfig) -> Result<Self> {
        let band = config.band.parse()?;
        Self::new(
            band,
            config.standard_deviations.unwrap_or_default(),
            to_length(config.length)?,
            to_offset(config.offset)?,
        )
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn calc(&self, data: &[Decimal]) -> Result<Decimal> {
        if !self.valid {
            return Err(IndicatorError::InvalidIndicator);
        }
        let window = resize(data, self.length, self.offset)?;
        let middle = mean(window);

        if self.band == Band::Middle {
            return Ok(middle);
        }

        let spread = self.standard_deviations * std_dev(window);
        Ok(match self.band {
            Band::Upper => middle + spread,
            _ => middle - spread,
        })
    }

    fn count(&self) -> usize {
        self.length.saturating_add(self.offset)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
