//! CSV ingest for daily sentiment and risk data
//!
//! Expected columns:
//! `date,symbol,bull_minus_bear,tradable,momentum,short_term_reversal,size,value,volatility`
//!
//! Sentiment and beta columns may be empty. Betas are kept only when at
//! least one exposure column is reported; missing exposures within a
//! reported row default to zero.

use super::{Observation, SessionRecord};
use crate::risk::FactorBetas;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Data ingest errors
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file: {0}")]
    Csv(#[from] csv::Error),
    #[error("data file contains no records")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    symbol: String,
    bull_minus_bear: Option<Decimal>,
    tradable: bool,
    momentum: Option<Decimal>,
    short_term_reversal: Option<Decimal>,
    size: Option<Decimal>,
    value: Option<Decimal>,
    volatility: Option<Decimal>,
}

impl CsvRow {
    fn betas(&self) -> Option<FactorBetas> {
        let any_reported = self.momentum.is_some()
            || self.short_term_reversal.is_some()
            || self.size.is_some()
            || self.value.is_some()
            || self.volatility.is_some();
        if !any_reported {
            return None;
        }
        Some(FactorBetas {
            momentum: self.momentum.unwrap_or_default(),
            short_term_reversal: self.short_term_reversal.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            value: self.value.unwrap_or_default(),
            volatility: self.volatility.unwrap_or_default(),
        })
    }
}

/// Load dated observations from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<SessionRecord>, DataError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        let betas = row.betas();
        records.push(SessionRecord {
            date: row.date,
            observation: Observation {
                symbol: row.symbol.to_uppercase(),
                bull_minus_bear: row.bull_minus_bear,
                tradable: row.tradable,
                betas,
            },
        });
    }

    if records.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(records)
}
