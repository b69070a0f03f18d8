use anyhow::{Context, Result};
use clap::Parser;
use food_tables::{
    config::SplitConfig,
    convert::html_splits_to_csv,
    Categorizer, TableDocument,
};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Split a food composition reference table into per-category CSV files.
#[derive(Parser, Debug)]
#[command(name = "food_tables")]
struct Args {
    /// HTML document holding the reference table
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for `<NN>_<category>.csv` files; prints to stdout when omitted
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write each category's HTML table next to its CSV
    #[arg(long, requires = "output_dir")]
    emit_html: bool,

    /// YAML file with category name overrides
    #[arg(short, long, env = "FOOD_TABLES_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ─── 1) categories ──────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => SplitConfig::load(path)?,
        None => SplitConfig::default(),
    };
    let categories = config.category_table();
    info!(categories = categories.len(), "category table ready");

    // ─── 2) read + split ────────────────────────────────────────────
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {:?}", args.input))?;
    let document = TableDocument::parse(&html)
        .with_context(|| format!("parsing table in {:?}", args.input))?;
    let splits = Categorizer::new(&categories)
        .split_table(document)
        .with_context(|| format!("splitting {:?}", args.input))?;

    // ─── 3) reparse into CSV ────────────────────────────────────────
    let html_splits: Vec<String> = splits.iter().map(|s| s.to_html()).collect();
    let csv_splits = html_splits_to_csv(&html_splits)?;

    // ─── 4) emit ────────────────────────────────────────────────────
    let Some(out_dir) = &args.output_dir else {
        for (index, csv_text) in csv_splits.iter().enumerate() {
            println!("CSV Text for Split {}:\n{}\n", index + 1, csv_text);
        }
        return Ok(());
    };

    fs::create_dir_all(out_dir).with_context(|| format!("creating {:?}", out_dir))?;
    for (i, ((split, csv_text), html)) in splits
        .iter()
        .zip(&csv_splits)
        .zip(&html_splits)
        .enumerate()
    {
        let stem = split.file_stem(i + 1);
        let csv_path = out_dir.join(format!("{}.csv", stem));
        fs::write(&csv_path, format!("{}\n", csv_text))
            .with_context(|| format!("writing {:?}", csv_path))?;
        if args.emit_html {
            let html_path = out_dir.join(format!("{}.html", stem));
            fs::write(&html_path, html).with_context(|| format!("writing {:?}", html_path))?;
        }
        info!(key = %split.key, rows = split.rows.len(), file = %csv_path.display(), "wrote split");
    }

    info!(splits = splits.len(), dir = %out_dir.display(), "done");
    Ok(())
}
