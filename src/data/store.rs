//! In-memory daily history store

use super::{Observation, SessionRecord};
use crate::risk::{FactorBetas, RiskBetas};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Daily observations keyed by session date, then by symbol.
///
/// Backs the pipeline engine's lookback windows. Dates iterate in
/// calendar order, symbols in lexical order, so evaluation output is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    days: BTreeMap<NaiveDate, BTreeMap<String, Observation>>,
}

impl MarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single dated observation, replacing any prior one for
    /// the same session and symbol.
    pub fn insert(&mut self, date: NaiveDate, observation: Observation) {
        self.days
            .entry(date)
            .or_default()
            .insert(observation.symbol.clone(), observation);
    }

    /// Bulk-load ingested records.
    pub fn extend(&mut self, records: impl IntoIterator<Item = SessionRecord>) {
        for record in records {
            self.insert(record.date, record.observation);
        }
    }

    /// All session dates present, in calendar order.
    pub fn sessions(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    /// First and last session dates, if any data is loaded.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }

    /// Symbols observed on a given session.
    pub fn symbols_on(&self, date: NaiveDate) -> Vec<String> {
        self.days
            .get(&date)
            .map(|day| day.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The observation for one symbol on one session.
    pub fn observation(&self, date: NaiveDate, symbol: &str) -> Option<&Observation> {
        self.days.get(&date)?.get(symbol)
    }

    /// Sentiment readings for a symbol over the trailing `window` sessions
    /// ending at `end` (inclusive). Only defined readings are returned;
    /// sessions where the symbol is absent or unreported are skipped.
    pub fn sentiment_window(&self, symbol: &str, end: NaiveDate, window: usize) -> Vec<Decimal> {
        self.days
            .range(..=end)
            .rev()
            .take(window)
            .filter_map(|(_, day)| day.get(symbol).and_then(|obs| obs.bull_minus_bear))
            .collect()
    }

    /// Style-factor exposures for every asset with betas on a session.
    pub fn risk_betas(&self, date: NaiveDate) -> RiskBetas {
        let mut table = RiskBetas::new();
        if let Some(day) = self.days.get(&date) {
            for (symbol, obs) in day {
                if let Some(betas) = &obs.betas {
                    table.insert(symbol.clone(), betas.clone());
                }
            }
        }
        table
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Convenience constructor used by tests and fixtures.
pub fn observation(
    symbol: &str,
    bull_minus_bear: Option<Decimal>,
    tradable: bool,
    betas: Option<FactorBetas>,
) -> Observation {
    Observation {
        symbol: symbol.to_string(),
        bull_minus_bear,
        tradable,
        betas,
    }
}
