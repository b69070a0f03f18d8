use anyhow::Result;
use clap::Parser;
use food_tables::clean::{clean_workbook, DEFAULT_OUTPUT};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Strip `+`/`-` annotation suffixes from every text cell of a spreadsheet.
#[derive(Parser, Debug)]
struct Args {
    /// Spreadsheet to clean
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the cleaned spreadsheet
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    clean_workbook(&args.input, &args.output)?;
    Ok(())
}
