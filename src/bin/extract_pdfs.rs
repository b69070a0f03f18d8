use anyhow::{Context, Result};
use clap::Parser;
use food_tables::extract::{extract_dir, HttpConverter, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

/// Convert a directory of PDF tables into spreadsheets via the remote build API.
#[derive(Parser, Debug)]
struct Args {
    /// Directory containing the PDFs
    #[arg(long)]
    input_dir: PathBuf,

    /// Directory for the `.xlsx` results (created if missing)
    #[arg(long)]
    output_dir: PathBuf,

    /// Conversion endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Bearer token for the conversion service
    #[arg(long, env = "PDF_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Per-request timeout
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    info!(
        input = %args.input_dir.display(),
        output = %args.output_dir.display(),
        endpoint = %args.endpoint,
        timeout_secs = args.timeout_secs,
        "Configuration"
    );

    let converter = HttpConverter::new(
        args.endpoint,
        args.api_key,
        Duration::from_secs(args.timeout_secs),
    )
    .context("building HTTP client")?;

    let report = extract_dir(&converter, &args.input_dir, &args.output_dir)?;
    if !report.failed.is_empty() {
        warn!(
            failed = report.failed.len(),
            "some PDFs were not converted: {:?}",
            report.failed.iter().map(|(name, _)| name).collect::<Vec<_>>()
        );
    }
    Ok(())
}
