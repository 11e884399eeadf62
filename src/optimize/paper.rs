//! Paper portfolio optimizer
//!
//! Turns a submission into target weights with a deterministic heuristic and
//! records the resulting plan. Not a real constraint solver; it honors the
//! constraint vocabulary well enough to drive simulated sessions:
//! proportional alpha weights, demeaned for dollar neutrality, clipped to the
//! position bounds, scaled to the gross and factor-exposure bounds, and
//! turnover-capped against the previously recorded holdings.

use super::{Constraint, Objective, OrderPlan, PlanId, PortfolioOptimizer, RiskModelVersion};
use crate::risk::{RiskBetas, RiskFactor};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Net style-factor exposure bound applied for [`RiskModelVersion::Newest`]
const STYLE_EXPOSURE_BOUND: Decimal = dec!(0.36);

#[derive(Debug)]
struct ParsedConstraints {
    min_position: Decimal,
    max_position: Decimal,
    max_gross: Decimal,
    max_turnover: Option<Decimal>,
    dollar_neutral: bool,
    risk: Option<RiskBetas>,
}

impl ParsedConstraints {
    fn from(constraints: &[Constraint]) -> Self {
        let mut parsed = Self {
            min_position: dec!(-1),
            max_position: dec!(1),
            max_gross: dec!(1),
            max_turnover: None,
            dollar_neutral: false,
            risk: None,
        };
        for constraint in constraints {
            match constraint {
                Constraint::PositionConcentration { min, max } => {
                    parsed.min_position = *min;
                    parsed.max_position = *max;
                }
                Constraint::MaxGrossExposure(gross) => parsed.max_gross = *gross,
                Constraint::DollarNeutral => parsed.dollar_neutral = true,
                Constraint::MaxTurnover(turnover) => parsed.max_turnover = Some(*turnover),
                Constraint::RiskModelExposure { betas, version } => {
                    let RiskModelVersion::Newest = version;
                    parsed.risk = Some(betas.clone());
                }
            }
        }
        parsed
    }
}

/// Recording optimizer with simulated plan construction
pub struct PaperOptimizer {
    holdings: Arc<RwLock<BTreeMap<String, Decimal>>>,
    submissions: Arc<RwLock<Vec<OrderPlan>>>,
}

impl PaperOptimizer {
    pub fn new() -> Self {
        Self {
            holdings: Arc::new(RwLock::new(BTreeMap::new())),
            submissions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Current recorded holdings (target weights of the last plan).
    pub async fn holdings(&self) -> BTreeMap<String, Decimal> {
        self.holdings.read().await.clone()
    }

    fn target_weights(
        alpha: &crate::pipeline::FactorTable,
        holdings: &BTreeMap<String, Decimal>,
        bounds: &ParsedConstraints,
    ) -> (BTreeMap<String, Decimal>, Decimal) {
        let mut weights: BTreeMap<String, Decimal> = BTreeMap::new();

        let mean = if bounds.dollar_neutral {
            alpha.mean().unwrap_or_default()
        } else {
            Decimal::ZERO
        };
        let gross_alpha: Decimal = alpha.iter().map(|(_, a)| (*a - mean).abs()).sum();

        if gross_alpha > Decimal::ZERO {
            for (symbol, a) in alpha.iter() {
                let raw = (*a - mean) / gross_alpha * bounds.max_gross;
                weights.insert(
                    symbol.clone(),
                    raw.clamp(bounds.min_position, bounds.max_position),
                );
            }

            // Clipping can reintroduce a net tilt; demean once more inside
            // the position bounds.
            if bounds.dollar_neutral && !weights.is_empty() {
                let net: Decimal = weights.values().copied().sum();
                let adjustment = net / Decimal::from(weights.len() as u64);
                for weight in weights.values_mut() {
                    *weight =
                        (*weight - adjustment).clamp(bounds.min_position, bounds.max_position);
                }
            }

            // Scale the whole book down if any net factor exposure breaches
            // the published bound.
            if let Some(betas) = &bounds.risk {
                let mut scale = Decimal::ONE;
                for factor in RiskFactor::ALL {
                    let exposure: Decimal = weights
                        .iter()
                        .map(|(symbol, weight)| {
                            betas
                                .get(symbol)
                                .map(|b| *weight * b.get(factor))
                                .unwrap_or_default()
                        })
                        .sum();
                    if exposure.abs() > STYLE_EXPOSURE_BOUND {
                        scale = scale.min(STYLE_EXPOSURE_BOUND / exposure.abs());
                    }
                }
                if scale < Decimal::ONE {
                    for weight in weights.values_mut() {
                        *weight *= scale;
                    }
                }
            }
        }

        // Held names absent from the alpha vector are liquidated.
        for symbol in holdings.keys() {
            weights.entry(symbol.clone()).or_insert(Decimal::ZERO);
        }

        // Cap turnover by shrinking every trade proportionally.
        let mut gross_trade: Decimal = weights
            .iter()
            .map(|(symbol, target)| {
                (*target - holdings.get(symbol).copied().unwrap_or_default()).abs()
            })
            .sum();
        if let Some(cap) = bounds.max_turnover {
            if gross_trade > cap && gross_trade > Decimal::ZERO {
                let scale = cap / gross_trade;
                for (symbol, target) in weights.iter_mut() {
                    let held = holdings.get(symbol).copied().unwrap_or_default();
                    *target = held + (*target - held) * scale;
                }
                gross_trade = cap;
            }
        }

        (weights, gross_trade)
    }
}

impl Default for PaperOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioOptimizer for PaperOptimizer {
    async fn order_optimal_portfolio(
        &self,
        objective: Objective,
        constraints: Vec<Constraint>,
    ) -> anyhow::Result<PlanId> {
        let bounds = ParsedConstraints::from(&constraints);
        let alpha = objective.alpha();

        let mut holdings = self.holdings.write().await;
        let (targets, turnover) = Self::target_weights(alpha, &holdings, &bounds);

        let plan = OrderPlan {
            id: Uuid::new_v4(),
            targets: targets.clone(),
            turnover,
            timestamp: Utc::now(),
        };
        let plan_id = plan.id;

        *holdings = targets
            .into_iter()
            .filter(|(_, weight)| !weight.is_zero())
            .collect();

        let mut submissions = self.submissions.write().await;
        submissions.push(plan);

        tracing::info!(
            ?plan_id,
            assets = alpha.len(),
            constraints = constraints.len(),
            %turnover,
            "rebalance plan recorded"
        );
        Ok(plan_id)
    }

    async fn submissions(&self) -> anyhow::Result<Vec<OrderPlan>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.clone())
    }
}
