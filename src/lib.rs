//! sentibal: weekly sentiment-driven long/short rebalancing engine
//!
//! This library provides the core components for:
//! - Declarative daily pipelines (smoothed sentiment factor plus screen)
//! - A platform-shaped risk loading pipeline
//! - The weekly rebalance strategy (one objective, five constraints)
//! - A paper portfolio optimizer with recorded plans
//! - A session driver playing the host scheduler
//! - CSV ingest of daily sentiment and risk data
//! - Full observability stack

pub mod cli;
pub mod config;
pub mod data;
pub mod optimize;
pub mod pipeline;
pub mod risk;
pub mod scheduler;
pub mod sim;
pub mod strategy;
pub mod telemetry;
