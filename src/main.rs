use clap::Parser;
use sentibal::cli::{Cli, Commands};
use sentibal::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = sentibal::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting session driver");
            args.execute(&config).await?;
        }
        Commands::Pipeline(args) => {
            args.execute(&config).await?;
        }
        Commands::Status => {
            println!("sentibal status");
            println!("  Mode: Simulated sessions");
            println!("  Status: Not running");
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Data: {}", config.data.path.display());
            println!(
                "  Strategy: leverage={}, position={}, turnover={}, window={}",
                config.strategy.max_leverage,
                config.strategy.max_position_size,
                config.strategy.max_turnover,
                config.strategy.smoothing_window
            );
            println!("  Telemetry: port={}", config.telemetry.metrics_port);
        }
    }

    Ok(())
}
