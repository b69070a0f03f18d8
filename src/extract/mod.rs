// src/extract/mod.rs
pub mod service;

use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, instrument, warn};

pub use service::{Converter, ExtractError, HttpConverter, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// Outcome of one extraction batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub saved: Vec<PathBuf>,
    /// (file name, reason) for every PDF that produced no spreadsheet.
    pub failed: Vec<(String, String)>,
}

/// Spreadsheet name for a PDF: spaces become underscores, `.pdf` becomes `.xlsx`.
pub fn output_file_name(pdf_name: &str) -> String {
    let underscored = pdf_name.replace(' ', "_");
    let stem = Path::new(&underscored)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(underscored.clone());
    format!("{}.xlsx", stem)
}

/// PDFs directly inside `dir`, sorted by path. Extension match ignores case.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let mut pdfs = Vec::new();
    for entry in glob_with(&pattern, options)? {
        match entry {
            Ok(path) if path.is_file() => pdfs.push(path),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "unreadable directory entry"),
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Convert every PDF in `input_dir`, one at a time, into `output_dir`.
///
/// A failure on one file is logged and recorded in the report; the batch
/// moves on to the next file. Only a missing or unlistable input directory
/// aborts.
#[instrument(level = "info", skip_all, fields(input = %input_dir.display(), output = %output_dir.display()))]
pub fn extract_dir<C: Converter>(
    converter: &C,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        anyhow::bail!("input directory {:?} does not exist", input_dir);
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {:?}", output_dir))?;

    let pdfs = list_pdfs(input_dir)?;
    info!(files = pdfs.len(), "found PDFs");

    let mut report = BatchReport::default();
    for pdf in pdfs {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out = output_dir.join(output_file_name(&name));

        match extract_one(converter, &pdf, &name, &out) {
            Ok(()) => {
                info!("Saved: {}", out.display());
                report.saved.push(out);
            }
            Err(e) => {
                error!("Failed to extract table from {}: {}", name, e);
                report.failed.push((name, e.to_string()));
            }
        }
    }

    info!(
        saved = report.saved.len(),
        failed = report.failed.len(),
        "extraction batch finished"
    );
    Ok(report)
}

fn extract_one<C: Converter>(
    converter: &C,
    pdf: &Path,
    name: &str,
    out: &Path,
) -> Result<(), ExtractError> {
    let bytes = fs::read(pdf).map_err(|source| ExtractError::Io {
        path: pdf.to_path_buf(),
        source,
    })?;
    let xlsx = converter.convert(name, bytes)?;
    fs::write(out, xlsx).map_err(|source| ExtractError::Io {
        path: out.to_path_buf(),
        source,
    })
}
