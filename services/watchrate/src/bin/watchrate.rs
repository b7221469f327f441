//! services/watchrate/src/bin/watchrate.rs

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchrate_lib::{
    cli::Cli,
    config::Config,
    error::AppError,
    runner::{run, RunOutcome},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Parse Arguments, Load Configuration & Set Up Logging ---
    let cli = Cli::parse();
    let config = Config::from_env()?;
    // Logs go to stderr; stdout may carry the report.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Processing {}", cli.input.display());

    // --- 2. Run the Batch ---
    match run(&cli, &config).await {
        Ok(RunOutcome::Written { participants, rows }) => {
            info!(
                "Watch rates computed for {} participants ({} rows)",
                participants, rows
            );
            Ok(())
        }
        Ok(RunOutcome::EmptyInput) => Ok(()),
        Err(e) => {
            error!("Run aborted, no report written: {}", e);
            Err(e)
        }
    }
}
