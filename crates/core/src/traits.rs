use std::any::Any;
use std::fmt;

use rust_decimal::Decimal;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{IndicatorError, Result};

// ---------------------------------------------------------------------------
// Indicator Trait
// ---------------------------------------------------------------------------

/// A calculator that reduces an ordered decimal sequence (oldest first) to a
/// single value.
///
/// Instances are immutable once built by their validating factory, so the
/// same instance may be shared across threads and evaluated against any
/// number of sequences.
pub trait Indicator: DynIndicator + fmt::Debug {
    /// Discriminator written to the `"name"` field on the wire.
    fn name(&self) -> &'static str;

    /// Calculate the value over the trailing `count()` points of `data`.
    fn calc(&self, data: &[Decimal]) -> Result<Decimal>;

    /// Total number of trailing points required, nested requirements and
    /// offsets included.
    fn count(&self) -> usize;

    /// Number of most recent points skipped during the calculation.
    fn offset(&self) -> usize;

    /// Structural equality against an indicator of any variant. Different
    /// variants never compare equal.
    fn equal(&self, other: &dyn Indicator) -> bool {
        self.dyn_eq(other)
    }

    /// Encode the configuration together with its discriminator.
    fn named_value(&self) -> Result<Value> {
        let fields = match self.fields_value()? {
            Value::Object(fields) => fields,
            other => {
                return Err(IndicatorError::Json(serde_json::Error::custom(format!(
                    "{} fields must encode as an object, got {other}",
                    self.name()
                ))))
            }
        };

        let mut named = Map::with_capacity(fields.len() + 1);
        named.insert("name".to_string(), Value::String(self.name().to_string()));
        named.extend(fields);
        Ok(Value::Object(named))
    }
}

/// Object-safe plumbing behind `Box<dyn Indicator>`: downcasting, cloning,
/// equality and field encoding. Implemented automatically for every
/// indicator that is `Clone + PartialEq + Serialize`.
pub trait DynIndicator: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn clone_boxed(&self) -> Box<dyn Indicator>;

    fn dyn_eq(&self, other: &dyn Indicator) -> bool;

    /// Encode the configuration fields without the discriminator.
    fn fields_value(&self) -> Result<Value>;
}

impl<T> DynIndicator for T
where
    T: Indicator + Clone + PartialEq + Serialize + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Indicator> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn Indicator) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn fields_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PartialEq for dyn Indicator {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Clone for Box<dyn Indicator> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Nested sources always travel in their tagged form.
impl Serialize for dyn Indicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.named_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// `serialize_with` helper that writes a concretely typed nested source in its
/// tagged form.
pub fn serialize_named<T, S>(indicator: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Indicator,
    S: Serializer,
{
    (indicator as &dyn Indicator).serialize(serializer)
}
