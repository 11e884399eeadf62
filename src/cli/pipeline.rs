//! Pipeline inspection command

use crate::config::Config;
use crate::data::{load_csv, MarketData};
use crate::pipeline::{PipelineEngine, SimEngine};
use crate::strategy::{make_pipeline, DATA_PIPE, RISK_PIPE};
use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Session to evaluate (defaults to the last date in the data file)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl PipelineArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let records = load_csv(&config.data.path)
            .with_context(|| format!("loading {}", config.data.path.display()))?;
        let mut data = MarketData::new();
        data.extend(records);

        let (_, last) = data.date_range().context("data file has no sessions")?;
        let date = self.date.unwrap_or(last);

        let engine = SimEngine::new(data);
        engine
            .attach_pipeline(DATA_PIPE, make_pipeline(config.strategy.smoothing_window))
            .await?;
        engine.attach_risk_pipeline(RISK_PIPE).await?;
        engine.compute(date).await?;

        let table = engine.pipeline_output(DATA_PIPE).await?;
        let betas = engine.risk_loadings(RISK_PIPE).await?;

        println!("Pipeline output for {date} ({} assets)", table.len());
        for (symbol, score) in table.iter() {
            let loaded = if betas.get(symbol).is_some() { "betas" } else { "-" };
            println!("  {symbol:<8} {score:>10}  {loaded}");
        }
        if table.is_empty() {
            println!("  (empty: no asset passed the screen)");
        }
        Ok(())
    }
}
