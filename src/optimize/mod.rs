//! Portfolio optimization module
//!
//! The objective/constraint vocabulary the strategy submits each cycle, the
//! optimizer capability trait, and a paper implementation that turns a
//! submission into recorded target weights.

mod constraints;
mod objective;
mod paper;
mod types;

pub use constraints::{Constraint, RiskModelVersion};
pub use objective::Objective;
pub use paper::PaperOptimizer;
pub use types::{OrderPlan, PlanId};

use async_trait::async_trait;

/// Optimizer capability: accepts one objective plus a constraint list and
/// owns the translation into an order plan. Feasibility and execution are
/// its concern, not the strategy's.
#[async_trait]
pub trait PortfolioOptimizer: Send + Sync {
    /// Submit a rebalance request.
    async fn order_optimal_portfolio(
        &self,
        objective: Objective,
        constraints: Vec<Constraint>,
    ) -> anyhow::Result<PlanId>;

    /// Every plan recorded so far, in submission order.
    async fn submissions(&self) -> anyhow::Result<Vec<OrderPlan>>;
}
