//! Composable technical indicators over decimal series.
//!
//! Leaves (`sma`, `ema`, `wma`, `roc`, `rsi`, `stoch`, `aroon`, `bb`) compute
//! directly from the input; composites (`dema`, `hma`, `srsi`, `cci`, `cd`)
//! combine nested indicators. Every indicator round-trips through the
//! name-tagged JSON codec in [`registry`].

pub mod aroon;
pub mod bollinger;
pub mod cci;
pub mod cd;
pub mod config;
pub mod dema;
pub mod ema;
pub mod hma;
pub mod registry;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod srsi;
pub mod stochastic;
pub mod wma;

pub use aroon::{Aroon, AroonConfig};
pub use bollinger::{BollingerBands, BollingerConfig};
pub use cci::{Cci, CciConfig, DEFAULT_FACTOR};
pub use cd::{Cd, CdConfig};
pub use config::WindowConfig;
pub use dema::{Dema, DemaConfig};
pub use ema::Ema;
pub use hma::{Hma, HmaConfig};
pub use registry::{from_json, from_value, registered_names, to_json, to_value};
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use srsi::{Srsi, SrsiConfig};
pub use stochastic::Stoch;
pub use wma::Wma;

pub use chainta_core::{Band, ErrorKind, Indicator, IndicatorError, Result, Trend};

/// Drops every indicator structurally equal to an earlier one, keeping the
/// first occurrence and the input order.
pub fn dedup(indicators: Vec<Box<dyn Indicator>>) -> Vec<Box<dyn Indicator>> {
    let mut unique: Vec<Box<dyn Indicator>> = Vec::with_capacity(indicators.len());
    for indicator in indicators {
        if !unique.iter().any(|seen| seen.equal(indicator.as_ref())) {
            unique.push(indicator);
        }
    }
    unique
}
