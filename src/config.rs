//! Configuration types for sentibal

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: StrategyConfig,
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

/// Strategy bounds, immutable after initialization
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Maximum gross leverage
    #[serde(default = "default_max_leverage")]
    pub max_leverage: Decimal,

    /// Maximum absolute weight per asset
    #[serde(default = "default_max_position_size")]
    pub max_position_size: Decimal,

    /// Maximum fraction of portfolio value traded per rebalance
    #[serde(default = "default_max_turnover")]
    pub max_turnover: Decimal,

    /// Sessions in the sentiment moving-average window
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

fn default_max_leverage() -> Decimal {
    dec!(1.0)
}
fn default_max_position_size() -> Decimal {
    dec!(0.015)
}
fn default_max_turnover() -> Decimal {
    dec!(0.95)
}
fn default_smoothing_window() -> usize {
    3
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            max_leverage: dec!(1.0),
            max_position_size: dec!(0.015),
            max_turnover: dec!(0.95),
            smoothing_window: 3,
        }
    }
}

/// Data ingest configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the daily sentiment/risk CSV file
    pub path: PathBuf,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus exporter port; 0 disables the exporter
    pub metrics_port: u16,
    pub log_level: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [strategy]
            max_leverage = 1.0
            max_position_size = 0.015
            max_turnover = 0.95
            smoothing_window = 3

            [data]
            path = "./data/sentiment.csv"

            [telemetry]
            metrics_port = 9090
            log_level = "info"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.strategy.max_position_size, dec!(0.015));
        assert_eq!(config.strategy.smoothing_window, 3);
        assert_eq!(config.telemetry.metrics_port, 9090);
    }

    #[test]
    fn test_strategy_defaults() {
        let toml = r#"
            [data]
            path = "./data/sentiment.csv"

            [telemetry]
            metrics_port = 0
            log_level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.strategy.max_leverage, dec!(1.0));
        assert_eq!(config.strategy.max_position_size, dec!(0.015));
        assert_eq!(config.strategy.max_turnover, dec!(0.95));
        assert_eq!(config.strategy.smoothing_window, 3);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_clone() {
        let config = StrategyConfig::default();
        let cloned = config.clone();
        assert_eq!(config.max_turnover, cloned.max_turnover);
    }
}
