//! Run command implementation

use crate::config::Config;
use crate::data::{load_csv, MarketData};
use crate::optimize::PortfolioOptimizer;
use crate::sim::SessionDriver;
use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// First session to drive (defaults to the first date in the data file)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last session to drive (defaults to the last date in the data file)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let records = load_csv(&config.data.path)
            .with_context(|| format!("loading {}", config.data.path.display()))?;
        let mut data = MarketData::new();
        data.extend(records);

        let (first, last) = data.date_range().context("data file has no sessions")?;
        let start = self.start.unwrap_or(first);
        let end = self.end.unwrap_or(last);
        tracing::info!(%start, %end, "driving session range");

        let driver = SessionDriver::new(data);
        let report = driver.run(&config.strategy, start, end).await?;

        println!("Session range {start}..={end}");
        println!("  Sessions:   {}", report.sessions);
        println!("  Cycles:     {}", report.cycles);
        println!("  Rebalances: {}", report.rebalances);
        println!("  Skipped:    {}", report.skipped);
        if let Some(plan_id) = report.last_plan {
            let submissions = driver.optimizer().submissions().await?;
            if let Some(plan) = submissions.iter().find(|p| p.id == plan_id) {
                println!(
                    "  Last plan:  {} assets, gross {}, turnover {}",
                    plan.targets.len(),
                    plan.gross(),
                    plan.turnover
                );
            }
        }
        Ok(())
    }
}
