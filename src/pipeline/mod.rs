//! Pipeline module
//!
//! Declarative daily computations over the asset universe: a pipeline is a
//! static query object (one factor column plus a screen) handed to an engine
//! that evaluates it once per session and exposes the latest output table.

mod engine;
mod factors;
mod filters;
mod table;

pub use engine::SimEngine;
pub use factors::{Factor, SentimentInput};
pub use filters::Filter;
pub use table::FactorTable;

use async_trait::async_trait;

/// A declarative pipeline: one named factor column and a screen selecting
/// which assets appear in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// Name of the output column
    pub column: String,
    /// Factor producing the column values
    pub factor: Factor,
    /// Screen applied to the daily universe
    pub screen: Filter,
}

impl Pipeline {
    pub fn new(column: impl Into<String>, factor: Factor, screen: Filter) -> Self {
        Self {
            column: column.into(),
            factor,
            screen,
        }
    }
}

/// Engine capability: accepts declarative pipelines at registration time and
/// serves their most recently computed outputs.
#[async_trait]
pub trait PipelineEngine: Send + Sync {
    /// Register a factor pipeline under a name. Re-registering a name is a
    /// registration error surfaced to the caller.
    async fn attach_pipeline(&self, name: &str, pipeline: Pipeline) -> anyhow::Result<()>;

    /// Register the platform-shaped risk loading pipeline under a name.
    async fn attach_risk_pipeline(&self, name: &str) -> anyhow::Result<()>;

    /// Latest computed output table for a named factor pipeline.
    async fn pipeline_output(&self, name: &str) -> anyhow::Result<FactorTable>;

    /// Latest computed factor exposures for a named risk pipeline.
    async fn risk_loadings(&self, name: &str) -> anyhow::Result<crate::risk::RiskBetas>;
}
