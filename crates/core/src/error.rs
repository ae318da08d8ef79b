use thiserror::Error;

/// Broad category of an [`IndicatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected by a validating factory.
    Configuration,
    /// Calculation attempted on an instance that never passed validation.
    Indicator,
    /// Input sequence shorter than the indicator requires.
    Data,
    /// Malformed payload or unknown discriminator.
    Decode,
}

/// Errors produced while building, computing, or decoding indicators.
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("Invalid length")]
    InvalidLength,
    #[error("Invalid offset")]
    InvalidOffset,
    #[error("Invalid trend: {0:?}")]
    InvalidTrend(String),
    #[error("Invalid band: {0:?}")]
    InvalidBand(String),
    #[error("Invalid factor")]
    InvalidFactor,
    #[error("Invalid standard deviations")]
    InvalidStandardDeviations,
    #[error("Invalid source")]
    InvalidSource,
    #[error("Invalid indicator: instance was not built by its factory")]
    InvalidIndicator,
    #[error("Insufficient data: {required} points required, {available} provided")]
    InsufficientData { required: usize, available: usize },
    #[error("Unknown indicator name: {0:?}")]
    UnknownName(String),
    #[error("Indicator payload has no name")]
    MissingName,
    #[error("Malformed indicator payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndicatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndicatorError::InvalidLength
            | IndicatorError::InvalidOffset
            | IndicatorError::InvalidTrend(_)
            | IndicatorError::InvalidBand(_)
            | IndicatorError::InvalidFactor
            | IndicatorError::InvalidStandardDeviations
            | IndicatorError::InvalidSource => ErrorKind::Configuration,
            IndicatorError::InvalidIndicator => ErrorKind::Indicator,
            IndicatorError::InsufficientData { .. } => ErrorKind::Data,
            IndicatorError::UnknownName(_)
            | IndicatorError::MissingName
            | IndicatorError::Json(_) => ErrorKind::Decode,
        }
    }
}

pub type Result<T, E = IndicatorError> = std::result::Result<T, E>;
