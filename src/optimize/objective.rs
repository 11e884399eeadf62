//! Optimization objectives

use crate::pipeline::FactorTable;

/// What the optimizer should maximize
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// Maximize weighted exposure to an alpha vector keyed by asset
    MaximizeAlpha(FactorTable),
}

impl Objective {
    /// The alpha vector backing this objective
    pub fn alpha(&self) -> &FactorTable {
        match self {
            Objective::MaximizeAlpha(table) => table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_alpha_accessor() {
        let mut table = FactorTable::new("sentiment_score");
        table.insert("AAPL", dec!(0.4));
        let objective = Objective::MaximizeAlpha(table.clone());
        assert_eq!(objective.alpha(), &table);
    }
}
