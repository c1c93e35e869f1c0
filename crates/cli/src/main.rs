mod cli;
mod progress_bar;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hardsub_core::{load_config, validate_config, JobRunner, TranscodeJob};

use cli::Cli;
use progress_bar::BarSink;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_normalized();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let input = cli.input();
    info!(
        "Starting video processing. Path: {}, Output: {}",
        input.display(),
        cli.output.display()
    );

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    let runner = JobRunner::from_config(config).with_sink(Arc::new(BarSink::new()));
    let outcome = runner
        .run(&TranscodeJob::new(input, cli.output))
        .await
        .context("Video processing failed")?;

    info!(
        output = %outcome.output.display(),
        elapsed_secs = outcome.elapsed.as_secs(),
        "Video processing completed successfully"
    );
    Ok(())
}
