//! The weekly sentiment rebalancing strategy
//!
//! Two callbacks driven by the host scheduler: a daily pre-open refresh of
//! the pipeline outputs, and a weekly rebalance at market open that submits
//! one objective and five constraints to the optimizer. Each weekly cycle is
//! a stateless decision over the day's two tables.

use crate::config::StrategyConfig;
use crate::optimize::{Constraint, Objective, PortfolioOptimizer, RiskModelVersion};
use crate::pipeline::{Factor, FactorTable, Filter, Pipeline, PipelineEngine, SentimentInput};
use crate::risk::RiskBetas;
use crate::scheduler::{DateRule, Scheduler, TimeRule};
use crate::telemetry::{inc_counter, set_gauge, CounterMetric, GaugeMetric};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Name the sentiment pipeline is attached under
pub const DATA_PIPE: &str = "data_pipe";
/// Name the risk loading pipeline is attached under
pub const RISK_PIPE: &str = "risk_pipe";

/// Working state carried between callbacks
#[derive(Debug, Clone)]
pub struct Context {
    /// Elapsed sessions; not consulted by any decision logic
    pub day_count: u64,
    pub max_leverage: Decimal,
    pub max_position_size: Decimal,
    pub max_turnover: Decimal,
    /// Latest sentiment pipeline output
    pub pipeline_data: FactorTable,
    /// Latest risk loading pipeline output
    pub risk_factor_betas: RiskBetas,
}

/// The strategy: configuration plus the two callback bodies
pub struct SentimentStrategy {
    engine: Arc<dyn PipelineEngine>,
    optimizer: Arc<dyn PortfolioOptimizer>,
    context: Context,
}

/// The sentiment pipeline: a 3-day (by default) moving average of the
/// bullish-minus-bearish reading, screened to tradable assets for which the
/// average is defined. The screen is always the intersection; never the
/// tradability filter alone.
pub fn make_pipeline(smoothing_window: usize) -> Pipeline {
    let sentiment_score =
        Factor::simple_moving_average(SentimentInput::BullMinusBear, smoothing_window);
    let screen = Filter::Tradable & sentiment_score.not_null();
    Pipeline::new("sentiment_score", sentiment_score, screen)
}

impl SentimentStrategy {
    /// Register both pipelines with the engine and the weekly rebalance rule
    /// with the scheduler. Pure setup; registration failures propagate.
    pub async fn initialize(
        engine: Arc<dyn PipelineEngine>,
        optimizer: Arc<dyn PortfolioOptimizer>,
        config: &StrategyConfig,
        scheduler: &mut Scheduler,
    ) -> anyhow::Result<Self> {
        engine
            .attach_pipeline(DATA_PIPE, make_pipeline(config.smoothing_window))
            .await?;
        engine.attach_risk_pipeline(RISK_PIPE).await?;
        scheduler.schedule(DateRule::WeekStart, TimeRule::MarketOpen);

        Ok(Self {
            engine,
            optimizer,
            context: Context {
                day_count: 0,
                max_leverage: config.max_leverage,
                max_position_size: config.max_position_size,
                max_turnover: config.max_turnover,
                pipeline_data: FactorTable::new("sentiment_score"),
                risk_factor_betas: RiskBetas::new(),
            },
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Daily pre-open refresh: copy the latest pipeline outputs into working
    /// state. No transformation, no validation; empty tables pass through.
    pub async fn before_trading_start(&mut self) -> anyhow::Result<()> {
        self.context.pipeline_data = self.engine.pipeline_output(DATA_PIPE).await?;
        self.context.risk_factor_betas = self.engine.risk_loadings(RISK_PIPE).await?;
        self.context.day_count += 1;

        set_gauge(
            GaugeMetric::UniverseSize,
            self.context.pipeline_data.len() as f64,
        );
        tracing::debug!(day = self.context.day_count, "session data refreshed");
        Ok(())
    }

    /// Weekly rebalance at market open. Submits nothing when the sentiment
    /// table is empty.
    pub async fn rebalance(&self) -> anyhow::Result<()> {
        let alpha = &self.context.pipeline_data;

        if !alpha.is_empty() {
            tracing::info!(assets = alpha.len(), "time to place some trades");

            let objective = Objective::MaximizeAlpha(alpha.clone());

            let constrain_position_size = Constraint::with_equal_bounds(
                -self.context.max_position_size,
                self.context.max_position_size,
            );
            let max_leverage = Constraint::MaxGrossExposure(self.context.max_leverage);
            let dollar_neutral = Constraint::DollarNeutral;
            let max_turnover = Constraint::MaxTurnover(self.context.max_turnover);
            let factor_risk_constraints = Constraint::RiskModelExposure {
                betas: self.context.risk_factor_betas.clone(),
                version: RiskModelVersion::Newest,
            };

            self.optimizer
                .order_optimal_portfolio(
                    objective,
                    vec![
                        constrain_position_size,
                        max_leverage,
                        dollar_neutral,
                        max_turnover,
                        factor_risk_constraints,
                    ],
                )
                .await?;
            inc_counter(CounterMetric::Rebalances);
        } else {
            inc_counter(CounterMetric::SkippedCycles);
        }

        tracing::debug!(head = %self.context.pipeline_data.head(), "pipeline snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_pipeline_screen_is_intersection() {
        let pipeline = make_pipeline(3);
        assert_eq!(pipeline.column, "sentiment_score");
        assert!(pipeline.screen.requires_tradable());
        assert!(pipeline.screen.requires_factor_defined());
    }

    #[test]
    fn test_make_pipeline_window() {
        let pipeline = make_pipeline(5);
        let Factor::SimpleMovingAverage { window, .. } = pipeline.factor;
        assert_eq!(window, 5);
    }
}
