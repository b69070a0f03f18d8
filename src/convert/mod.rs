// src/convert/mod.rs
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::table::{cell_text, DATA_CELL, HEADER_CELL, ROW};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("split {split} has no header row")]
    MissingHeader { split: usize },
}

/// Convert one split table into CSV text.
///
/// The first `<tr>` is the category title and is skipped. The second row's
/// `<th>` texts form the header line; every later row with `<td>` cells
/// becomes one line. Fields are joined with `,` and are never quoted, so a
/// cell holding a comma or newline will corrupt its line.
pub fn html_to_csv(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let mut rows = doc.select(&ROW).skip(1);

    let header: Vec<String> = rows.next()?.select(&HEADER_CELL).map(cell_text).collect();
    if header.is_empty() {
        return None;
    }

    let mut lines = vec![header.join(",")];
    lines.extend(rows.filter_map(data_line));
    Some(lines.join("\n"))
}

fn data_line(tr: ElementRef) -> Option<String> {
    let cells: Vec<String> = tr.select(&DATA_CELL).map(cell_text).collect();
    if cells.is_empty() {
        None
    } else {
        Some(cells.join(","))
    }
}

/// Convert every split, in order. Fails on the first split without a header.
#[instrument(level = "info", skip_all)]
pub fn html_splits_to_csv<S: AsRef<str>>(splits: &[S]) -> Result<Vec<String>, ConvertError> {
    splits
        .iter()
        .enumerate()
        .map(|(i, html)| {
            let csv = html_to_csv(html.as_ref()).ok_or(ConvertError::MissingHeader { split: i + 1 })?;
            debug!(split = i + 1, lines = csv.lines().count(), "converted split");
            Ok(csv)
        })
        .collect()
}
