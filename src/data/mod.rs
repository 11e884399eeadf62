//! Market data module
//!
//! Daily per-asset observations (sentiment readings, tradability flags,
//! externally computed risk betas) and the in-memory history store that
//! backs pipeline lookback windows.

mod csv;
mod store;

pub use csv::{load_csv, DataError};
pub use store::{observation, MarketData};

use crate::risk::FactorBetas;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One asset's observation for a single session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Asset symbol
    pub symbol: String,
    /// Raw bullish-minus-bearish sentiment reading, if reported
    pub bull_minus_bear: Option<Decimal>,
    /// Passes the standard liquidity/tradability screen
    pub tradable: bool,
    /// Externally computed style-factor exposures, if available
    pub betas: Option<FactorBetas>,
}

/// A dated observation as it arrives from ingest
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub observation: Observation,
}
