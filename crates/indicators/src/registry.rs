//! Name-tagged JSON codec for heterogeneous indicators.
//!
//! Every indicator travels as a flat object carrying a `"name"` discriminator
//! next to its own fields; composite sources are nested objects of the same
//! shape. Decoding resolves the discriminator through a process-wide table
//! built once on first use.

use std::collections::HashMap;

use chainta_core::{Indicator, IndicatorError, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::aroon::{Aroon, AroonConfig};
use crate::bollinger::{BollingerBands, BollingerConfig};
use crate::cci::{Cci, CciConfig};
use crate::cd::{Cd, CdConfig};
use crate::config::WindowConfig;
use crate::dema::{Dema, DemaConfig};
use crate::ema::Ema;
use crate::hma::{Hma, HmaConfig};
use crate::roc::Roc;
use crate::rsi::Rsi;
use crate::sma::Sma;
use crate::srsi::{Srsi, SrsiConfig};
use crate::stochastic::Stoch;
use crate::wma::Wma;

type Decoder = fn(Value) -> Result<Box<dyn Indicator>>;

static REGISTRY: Lazy<HashMap<&'static str, Decoder>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, Decoder> = HashMap::new();
    registry.insert(Aroon::NAME, decode::<AroonConfig, Aroon>);
    registry.insert(BollingerBands::NAME, decode::<BollingerConfig, BollingerBands>);
    registry.insert(Cci::NAME, decode::<CciConfig, Cci>);
    registry.insert(Cd::NAME, decode::<CdConfig, Cd>);
    registry.insert(Dema::NAME, decode::<DemaConfig, Dema>);
    registry.insert(Ema::NAME, decode::<WindowConfig, Ema>);
    registry.insert(Hma::NAME, decode::<HmaConfig, Hma>);
    registry.insert(Roc::NAME, decode::<WindowConfig, Roc>);
    registry.insert(Rsi::NAME, decode::<WindowConfig, Rsi>);
    registry.insert(Sma::NAME, decode::<WindowConfig, Sma>);
    registry.insert(Srsi::NAME, decode::<SrsiConfig, Srsi>);
    registry.insert(Stoch::NAME, decode::<WindowConfig, Stoch>);
    registry.insert(Wma::NAME, decode::<WindowConfig, Wma>);
    tracing::debug!(count = registry.len(), "indicator registry initialised");
    registry
});

/// Decodes the payload into `C`, then validates it through `T`'s factory.
/// Factory errors surface unchanged rather than wrapped in a JSON error.
fn decode<C, T>(value: Value) -> Result<Box<dyn Indicator>>
where
    C: DeserializeOwned,
    T: Indicator + TryFrom<C, Error = IndicatorError>,
{
    let config: C = serde_json::from_value(value)?;
    Ok(Box::new(T::try_from(config)?))
}

/// Decodes a tagged indicator object.
pub fn from_value(value: Value) -> Result<Box<dyn Indicator>> {
    let name = match value.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(IndicatorError::UnknownName(other.to_string())),
        None => return Err(IndicatorError::MissingName),
    };

    let decoder = REGISTRY
        .get(name.as_str())
        .ok_or_else(|| IndicatorError::UnknownName(name.clone()))?;

    tracing::trace!(name = %name, "decoding indicator");
    decoder(value)
}

/// Decodes a tagged indicator from its JSON text.
pub fn from_json(json: &str) -> Result<Box<dyn Indicator>> {
    from_value(serde_json::from_str(json)?)
}

/// Encodes an indicator as a tagged object.
pub fn to_value(indicator: &dyn Indicator) -> Result<Value> {
    indicator.named_value()
}

/// Encodes an indicator as tagged JSON text.
pub fn to_json(indicator: &dyn Indicator) -> Result<String> {
    Ok(serde_json::to_string(&to_value(indicator)?)?)
}

/// Discriminators known to the registry, sorted.
pub fn registered_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
