//! Pipeline output tables

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A single-column numeric table keyed by asset symbol, as produced by one
/// pipeline evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    column: String,
    rows: BTreeMap<String, Decimal>,
}

impl FactorTable {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            rows: BTreeMap::new(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn insert(&mut self, symbol: impl Into<String>, value: Decimal) {
        self.rows.insert(symbol.into(), value);
    }

    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.rows.get(symbol).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &String> {
        self.rows.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.rows.iter()
    }

    /// Sum of absolute values across the column.
    pub fn gross(&self) -> Decimal {
        self.rows.values().map(|v| v.abs()).sum()
    }

    /// Mean of the column, `None` for an empty table.
    pub fn mean(&self) -> Option<Decimal> {
        if self.rows.is_empty() {
            return None;
        }
        let sum: Decimal = self.rows.values().copied().sum();
        Some(sum / Decimal::from(self.rows.len() as u64))
    }

    /// First rows of the table, formatted for debug logging.
    pub fn head(&self) -> String {
        let mut out = String::new();
        for (symbol, value) in self.rows.iter().take(5) {
            let _ = write!(out, "{symbol}={value} ");
        }
        if self.rows.len() > 5 {
            let _ = write!(out, "... ({} rows)", self.rows.len());
        }
        out.trim_end().to_string()
    }
}

impl FromIterator<(String, Decimal)> for FactorTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            column: String::new(),
            rows: iter.into_iter().collect(),
        }
    }
}
