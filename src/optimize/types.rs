//! Optimizer output types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Order plan identifier
pub type PlanId = Uuid;

/// A recorded rebalance plan: the target weight per asset the optimizer
/// settled on for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlan {
    /// Plan identifier
    pub id: PlanId,
    /// Target portfolio weight per asset symbol
    pub targets: BTreeMap<String, Decimal>,
    /// Sum of absolute trade weights against prior holdings
    pub turnover: Decimal,
    /// Submission timestamp
    pub timestamp: DateTime<Utc>,
}

impl OrderPlan {
    /// Sum of absolute target weights.
    pub fn gross(&self) -> Decimal {
        self.targets.values().map(|w| w.abs()).sum()
    }

    /// Sum of signed target weights.
    pub fn net(&self) -> Decimal {
        self.targets.values().copied().sum()
    }
}
