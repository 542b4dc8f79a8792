use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

mod api_client;
mod export;
mod output;

use api_client::{ApiClient, Endpoint};
use export::ExportFormat;
use output::{print_event, print_summary};

#[derive(Parser)]
#[command(name = "keno-client")]
#[command(about = "Fetches the simulated Keno archive and exports it")]
struct Cli {
    /// Base URL of the backend (e.g., http://localhost:4000)
    #[arg(long, default_value = "http://127.0.0.1:4000")]
    base_url: String,

    /// Read events from the incremental endpoint instead of the buffered one
    #[arg(long)]
    stream: bool,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Output file (defaults to keno-archive.json or keno-archive.csv)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    let endpoint = if cli.stream {
        Endpoint::Streaming
    } else {
        Endpoint::Buffered
    };

    let api_client = ApiClient::new(reqwest::Client::new(), cli.base_url.clone());
    println!(
        "{} Parsing archive via {}",
        "→".blue(),
        api_client.url_for(endpoint)
    );

    let started = Instant::now();
    let download = api_client.fetch_archive(endpoint, print_event).await?;

    if !download.is_complete() {
        eprintln!(
            "\n{} Stream ended before the completion event",
            "!".yellow().bold()
        );
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(cli.format.default_file_name()));
    let rendered = export::render(cli.format, &download.draws)?;
    tokio::fs::write(&output, rendered)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_summary(&download, &output, started.elapsed());

    Ok(())
}
