//! Session driver
//!
//! Plays the host scheduler: iterates trading days in a range, computes
//! attached pipelines before open, fires the daily callback, and fires the
//! rebalance callback when the registered rule matches at market open.

use crate::config::StrategyConfig;
use crate::data::MarketData;
use crate::optimize::{PaperOptimizer, PlanId, PortfolioOptimizer};
use crate::pipeline::SimEngine;
use crate::scheduler::{sessions_between, Scheduler};
use crate::strategy::SentimentStrategy;
use crate::telemetry::{inc_counter, set_gauge, CounterMetric, GaugeMetric};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

/// Outcome of one driven session range
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    /// Trading sessions driven
    pub sessions: u64,
    /// Weekly cycles where the rule fired
    pub cycles: u64,
    /// Cycles that produced a plan submission
    pub rebalances: u64,
    /// Cycles skipped on an empty sentiment table
    pub skipped: u64,
    /// Identifier of the last recorded plan, if any
    pub last_plan: Option<PlanId>,
}

/// Drives the strategy callbacks over a date range
pub struct SessionDriver {
    engine: Arc<SimEngine>,
    optimizer: Arc<PaperOptimizer>,
}

impl SessionDriver {
    pub fn new(data: MarketData) -> Self {
        Self {
            engine: Arc::new(SimEngine::new(data)),
            optimizer: Arc::new(PaperOptimizer::new()),
        }
    }

    pub fn engine(&self) -> Arc<SimEngine> {
        Arc::clone(&self.engine)
    }

    pub fn optimizer(&self) -> Arc<PaperOptimizer> {
        Arc::clone(&self.optimizer)
    }

    /// Run the strategy over every trading session in `[start, end]`.
    pub async fn run(
        &self,
        config: &StrategyConfig,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<SessionReport> {
        let mut scheduler = Scheduler::new();
        let mut strategy = SentimentStrategy::initialize(
            self.engine(),
            self.optimizer(),
            config,
            &mut scheduler,
        )
        .await?;

        let mut report = SessionReport::default();

        for date in sessions_between(start, end) {
            self.engine.compute(date).await?;
            strategy.before_trading_start().await?;
            report.sessions += 1;
            inc_counter(CounterMetric::Sessions);

            if scheduler.due_at_open(date) {
                report.cycles += 1;
                let before = self.optimizer.submissions().await?.len();
                strategy.rebalance().await?;

                let submissions = self.optimizer.submissions().await?;
                if submissions.len() > before {
                    let plan = submissions.last().expect("submission just recorded");
                    report.rebalances += 1;
                    report.last_plan = Some(plan.id);
                    set_gauge(
                        GaugeMetric::GrossTarget,
                        plan.gross().to_f64().unwrap_or_default(),
                    );
                    set_gauge(
                        GaugeMetric::PlanTurnover,
                        plan.turnover.to_f64().unwrap_or_default(),
                    );
                    tracing::info!(%date, plan = %plan.id, "rebalanced");
                } else {
                    report.skipped += 1;
                    tracing::info!(%date, "cycle skipped: sentiment table empty");
                }
            }
        }

        tracing::info!(
            sessions = report.sessions,
            rebalances = report.rebalances,
            skipped = report.skipped,
            "session range complete"
        );
        Ok(report)
    }
}
