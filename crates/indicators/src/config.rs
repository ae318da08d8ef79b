//! Wire payloads decoded before a validating factory runs.

use std::str::FromStr;

use chainta_core::{IndicatorError, Result};
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payload shared by the single-window leaves (`sma`, `ema`, `wma`, `roc`,
/// `rsi`, `stoch`). Missing fields decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub length: i64,
    pub offset: i64,
}

impl WindowConfig {
    pub(crate) fn length(&self) -> Result<usize> {
        to_length(self.length)
    }

    pub(crate) fn offset(&self) -> Result<usize> {
        to_offset(self.offset)
    }
}

pub(crate) fn to_length(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| IndicatorError::InvalidLength)
}

pub(crate) fn to_offset(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| IndicatorError::InvalidOffset)
}

/// Optional decimal accepted as a JSON string or number. `null` and blank
/// strings decode as `None`.
pub(crate) fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a decimal string, got {other}"
            )))
        }
    };

    Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .map(Some)
        .map_err(D::Error::custom)
}

/// Decodes the concretely typed source of a composite. The nested `"name"` is
/// optional, but must match `expected` when present.
pub(crate) fn typed_source<C: DeserializeOwned>(value: Option<Value>, expected: &str) -> Result<C> {
    let value = match value {
        Some(Value::Null) | None => return Err(IndicatorError::InvalidSource),
        Some(value) => value,
    };

    match value.get("name") {
        None => {}
        Some(Value::String(name)) if name == expected => {}
        Some(_) => return Err(IndicatorError::InvalidSource),
    }

    Ok(serde_json::from_value(value)?)
}
