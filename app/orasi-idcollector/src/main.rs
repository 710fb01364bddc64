//! Orasi identifier collector main binary

use bridge_core::TelemetryProcessor;
use clap::Parser;
use id_collector::{IdCollectorConfig, IdCollectorProcessor};
use orasi_idcollector::{run_stream, DEFAULT_BATCH_SIZE, HOST_NAME, HOST_VERSION};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, BufWriter};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "orasi-idcollector")]
#[command(about = "Collect identifiers from NDJSON log records into a target attribute")]
#[command(version)]
struct Cli {
    /// Collector configuration file (yaml, toml or json)
    #[arg(short, long)]
    config: PathBuf,

    /// Input file with one JSON log record per line (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Records per processed batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries records
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("Starting {} v{}", HOST_NAME, HOST_VERSION);

    let config = IdCollectorConfig::from_file(&cli.config)?;
    info!("Configuration loaded from {}", cli.config.display());

    let processor = IdCollectorProcessor::new(config)?;
    processor.start().await?;

    let reader: Box<dyn AsyncBufRead + Unpin> = match &cli.input {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    let writer: Box<dyn AsyncWrite + Unpin> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(tokio::fs::File::create(path).await?)),
        None => Box::new(BufWriter::new(tokio::io::stdout())),
    };

    let summary = run_stream(&processor, reader, writer, cli.batch_size).await?;
    processor.shutdown().await?;

    info!(
        "Finished: {} records, {} skipped lines",
        summary.records, summary.skipped_lines
    );
    Ok(())
}
