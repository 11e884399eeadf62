//! Risk model types
//!
//! Per-asset exposures to the common style factors, produced by the
//! platform-shaped risk loading pipeline and consumed read-only by the
//! rebalance step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common style risk factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Momentum,
    ShortTermReversal,
    Size,
    Value,
    Volatility,
}

impl RiskFactor {
    /// All style factors, in table-column order
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::Momentum,
        RiskFactor::ShortTermReversal,
        RiskFactor::Size,
        RiskFactor::Value,
        RiskFactor::Volatility,
    ];

    /// Column name for this factor
    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::Momentum => "momentum",
            RiskFactor::ShortTermReversal => "short_term_reversal",
            RiskFactor::Size => "size",
            RiskFactor::Value => "value",
            RiskFactor::Volatility => "volatility",
        }
    }
}

/// One asset's exposures to the style factors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorBetas {
    pub momentum: Decimal,
    pub short_term_reversal: Decimal,
    pub size: Decimal,
    pub value: Decimal,
    pub volatility: Decimal,
}

impl FactorBetas {
    /// Exposure to a single factor
    pub fn get(&self, factor: RiskFactor) -> Decimal {
        match factor {
            RiskFactor::Momentum => self.momentum,
            RiskFactor::ShortTermReversal => self.short_term_reversal,
            RiskFactor::Size => self.size,
            RiskFactor::Value => self.value,
            RiskFactor::Volatility => self.volatility,
        }
    }
}

/// Table of factor exposures keyed by asset symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskBetas {
    rows: BTreeMap<String, FactorBetas>,
}

impl RiskBetas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, betas: FactorBetas) {
        self.rows.insert(symbol.into(), betas);
    }

    pub fn get(&self, symbol: &str) -> Option<&FactorBetas> {
        self.rows.get(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FactorBetas)> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_factor_betas_get() {
        let betas = FactorBetas {
            momentum: dec!(0.5),
            short_term_reversal: dec!(-0.1),
            size: dec!(0.2),
            value: dec!(0),
            volatility: dec!(-0.3),
        };
        assert_eq!(betas.get(RiskFactor::Momentum), dec!(0.5));
        assert_eq!(betas.get(RiskFactor::Volatility), dec!(-0.3));
    }

    #[test]
    fn test_risk_betas_table() {
        let mut table = RiskBetas::new();
        assert!(table.is_empty());

        table.insert("AAPL", FactorBetas::default());
        assert_eq!(table.len(), 1);
        assert!(table.get("AAPL").is_some());
        assert!(table.get("MSFT").is_none());
    }

    #[test]
    fn test_factor_names() {
        for factor in RiskFactor::ALL {
            assert!(!factor.name().is_empty());
        }
        assert_eq!(RiskFactor::ShortTermReversal.name(), "short_term_reversal");
    }
}
