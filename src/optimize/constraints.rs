//! Portfolio constraints

use crate::risk::RiskBetas;
use rust_decimal::Decimal;

/// Risk model version selector for the factor-exposure constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskModelVersion {
    /// Latest published bounds
    #[default]
    Newest,
}

/// One constraint handed to the optimizer
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Symmetric per-asset position bounds
    PositionConcentration { min: Decimal, max: Decimal },
    /// Upper bound on the sum of absolute position weights
    MaxGrossExposure(Decimal),
    /// Long and short book sizes must match
    DollarNeutral,
    /// Upper bound on the fraction of portfolio value traded this cycle
    MaxTurnover(Decimal),
    /// Bounds on net exposure to each common risk factor
    RiskModelExposure {
        betas: RiskBetas,
        version: RiskModelVersion,
    },
}

impl Constraint {
    /// Equal symmetric position bounds per asset.
    pub fn with_equal_bounds(min: Decimal, max: Decimal) -> Self {
        Constraint::PositionConcentration { min, max }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::PositionConcentration { .. } => "position_concentration",
            Constraint::MaxGrossExposure(_) => "max_gross_exposure",
            Constraint::DollarNeutral => "dollar_neutral",
            Constraint::MaxTurnover(_) => "max_turnover",
            Constraint::RiskModelExposure { .. } => "risk_model_exposure",
        }
    }
}
