//! Simulation pipeline engine
//!
//! Plays the role the hosting platform plays in production: holds the daily
//! data, evaluates attached pipelines once per session, and serves the most
//! recently computed tables to the strategy callbacks.

use super::{FactorTable, Pipeline, PipelineEngine};
use crate::data::MarketData;
use crate::risk::RiskBetas;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Pipeline registration and lookup errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pipeline already attached: {0}")]
    DuplicatePipeline(String),
    #[error("no pipeline attached under name: {0}")]
    UnknownPipeline(String),
    #[error("pipeline {0} has not been computed yet")]
    NotComputed(String),
}

#[derive(Debug)]
enum Attached {
    Factor(Pipeline),
    RiskLoadings,
}

#[derive(Debug, Default)]
struct EngineState {
    attached: BTreeMap<String, Attached>,
    factor_outputs: BTreeMap<String, FactorTable>,
    risk_outputs: BTreeMap<String, RiskBetas>,
}

/// In-memory engine evaluating pipelines against a [`MarketData`] store
pub struct SimEngine {
    data: MarketData,
    state: Arc<RwLock<EngineState>>,
}

impl SimEngine {
    pub fn new(data: MarketData) -> Self {
        Self {
            data,
            state: Arc::new(RwLock::new(EngineState::default())),
        }
    }

    pub fn data(&self) -> &MarketData {
        &self.data
    }

    /// Evaluate every attached pipeline for one session, replacing the
    /// previously served outputs. Runs before the daily callback.
    pub async fn compute(&self, date: NaiveDate) -> Result<(), EngineError> {
        let mut state = self.state.write().await;
        let mut factor_outputs = BTreeMap::new();
        let mut risk_outputs = BTreeMap::new();

        for (name, attached) in &state.attached {
            match attached {
                Attached::Factor(pipeline) => {
                    factor_outputs.insert(name.clone(), self.evaluate(pipeline, date));
                }
                Attached::RiskLoadings => {
                    risk_outputs.insert(name.clone(), self.data.risk_betas(date));
                }
            }
        }

        state.factor_outputs = factor_outputs;
        state.risk_outputs = risk_outputs;
        Ok(())
    }

    fn evaluate(&self, pipeline: &Pipeline, date: NaiveDate) -> FactorTable {
        let mut table = FactorTable::new(&pipeline.column);
        for symbol in self.data.symbols_on(date) {
            let Some(observation) = self.data.observation(date, &symbol) else {
                continue;
            };
            let value = pipeline.factor.evaluate(&self.data, &symbol, date);
            if pipeline.screen.passes(observation, value) {
                if let Some(value) = value {
                    table.insert(symbol, value);
                }
            }
        }
        table
    }
}

#[async_trait]
impl PipelineEngine for SimEngine {
    async fn attach_pipeline(&self, name: &str, pipeline: Pipeline) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state.attached.contains_key(name) {
            return Err(EngineError::DuplicatePipeline(name.to_string()).into());
        }
        state
            .attached
            .insert(name.to_string(), Attached::Factor(pipeline));
        tracing::info!(name, "pipeline attached");
        Ok(())
    }

    async fn attach_risk_pipeline(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state.attached.contains_key(name) {
            return Err(EngineError::DuplicatePipeline(name.to_string()).into());
        }
        state
            .attached
            .insert(name.to_string(), Attached::RiskLoadings);
        tracing::info!(name, "risk loading pipeline attached");
        Ok(())
    }

    async fn pipeline_output(&self, name: &str) -> anyhow::Result<FactorTable> {
        let state = self.state.read().await;
        if !state.attached.contains_key(name) {
            return Err(EngineError::UnknownPipeline(name.to_string()).into());
        }
        state
            .factor_outputs
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::NotComputed(name.to_string()).into())
    }

    async fn risk_loadings(&self, name: &str) -> anyhow::Result<RiskBetas> {
        let state = self.state.read().await;
        if !state.attached.contains_key(name) {
            return Err(EngineError::UnknownPipeline(name.to_string()).into());
        }
        state
            .risk_outputs
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::NotComputed(name.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation;
    use crate::pipeline::{Factor, Filter, SentimentInput};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn fixture() -> MarketData {
        let mut data = MarketData::new();
        for (offset, (aapl, msft)) in [(dec!(0.3), dec!(-0.1)), (dec!(0.4), dec!(-0.2)), (dec!(0.5), dec!(-0.3))]
            .into_iter()
            .enumerate()
        {
            let day = date("2024-01-02") + chrono::Days::new(offset as u64);
            data.insert(day, observation("AAPL", Some(aapl), true, None));
            data.insert(day, observation("MSFT", Some(msft), true, None));
            // Halted name with sentiment, and a tradable name without.
            data.insert(day, observation("HALT", Some(dec!(0.9)), false, None));
            data.insert(day, observation("QUIET", None, true, None));
        }
        data
    }

    fn sentiment_pipeline() -> Pipeline {
        let sma = Factor::simple_moving_average(SentimentInput::BullMinusBear, 3);
        let screen = Filter::Tradable & sma.not_null();
        Pipeline::new("sentiment_score", sma, screen)
    }

    #[tokio::test]
    async fn test_compute_applies_screen() {
        let engine = SimEngine::new(fixture());
        engine
            .attach_pipeline("data_pipe", sentiment_pipeline())
            .await
            .unwrap();

        engine.compute(date("2024-01-04")).await.unwrap();
        let table = engine.pipeline_output("data_pipe").await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("AAPL"), Some(dec!(0.4)));
        assert_eq!(table.get("MSFT"), Some(dec!(-0.2)));
        assert_eq!(table.get("HALT"), None);
        assert_eq!(table.get("QUIET"), None);
    }

    #[tokio::test]
    async fn test_output_empty_with_short_history() {
        let engine = SimEngine::new(fixture());
        engine
            .attach_pipeline("data_pipe", sentiment_pipeline())
            .await
            .unwrap();

        // Only one prior session; the 3-day average is undefined everywhere.
        engine.compute(date("2024-01-02")).await.unwrap();
        let table = engine.pipeline_output("data_pipe").await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let engine = SimEngine::new(fixture());
        engine
            .attach_pipeline("data_pipe", sentiment_pipeline())
            .await
            .unwrap();
        let err = engine
            .attach_pipeline("data_pipe", sentiment_pipeline())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already attached"));
    }

    #[tokio::test]
    async fn test_output_before_compute_is_error() {
        let engine = SimEngine::new(fixture());
        engine
            .attach_pipeline("data_pipe", sentiment_pipeline())
            .await
            .unwrap();
        assert!(engine.pipeline_output("data_pipe").await.is_err());
        assert!(engine.pipeline_output("other_pipe").await.is_err());
    }

    #[tokio::test]
    async fn test_risk_pipeline_passthrough() {
        let mut data = fixture();
        let betas = crate::risk::FactorBetas {
            momentum: dec!(0.7),
            ..Default::default()
        };
        data.insert(
            date("2024-01-04"),
            observation("AAPL", Some(dec!(0.5)), true, Some(betas.clone())),
        );

        let engine = SimEngine::new(data);
        engine.attach_risk_pipeline("risk_pipe").await.unwrap();
        engine.compute(date("2024-01-04")).await.unwrap();

        let loadings = engine.risk_loadings("risk_pipe").await.unwrap();
        assert_eq!(loadings.len(), 1);
        assert_eq!(loadings.get("AAPL"), Some(&betas));
    }
}
