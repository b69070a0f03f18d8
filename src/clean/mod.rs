// src/clean/mod.rs
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const DEFAULT_OUTPUT: &str = "cleaned_file.xlsx";

/// Start of an annotation suffix such as `+0.3` or `-1.2`.
static ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]").expect("static regex"));

/// Text before the first `+` or `-`; the whole value when neither occurs.
pub fn clean_cell(raw: &str) -> &str {
    match ANNOTATION.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows: usize,
    pub cleaned_cells: usize,
}

/// Clean every string cell below the header row. The header row and all
/// non-string cells are copied unchanged.
pub fn clean_rows(range: &Range<Data>) -> (Vec<Vec<Data>>, CleanSummary) {
    let mut summary = CleanSummary::default();
    let mut out = Vec::with_capacity(range.height());

    for (r, row) in range.rows().enumerate() {
        let cleaned = row
            .iter()
            .map(|cell| match cell {
                Data::String(s) if r > 0 => {
                    let kept = clean_cell(s);
                    if kept.len() != s.len() {
                        summary.cleaned_cells += 1;
                    }
                    Data::String(kept.to_string())
                }
                other => other.clone(),
            })
            .collect();
        out.push(cleaned);
    }

    summary.rows = out.len();
    (out, summary)
}

/// First worksheet of any workbook format calamine understands.
pub fn read_first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening workbook {:?}", path))?;
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook {:?} has no sheets", path))?
        .with_context(|| format!("reading first sheet of {:?}", path))
}

/// Largest integer magnitude an f64 holds exactly.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Write `rows` with the first cell placed at absolute `start` (row, column).
pub fn write_sheet(rows: &[Vec<Data>], start: (u32, u32), path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r)
            .ok()
            .and_then(|r| r.checked_add(start.0))
            .context("row index out of range")?;
        for (c, cell) in row.iter().enumerate() {
            let c = u32::try_from(c)
                .ok()
                .and_then(|c| c.checked_add(start.1))
                .and_then(|c| u16::try_from(c).ok())
                .context("column index out of range")?;
            match cell {
                Data::Empty => {}
                Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Data::Float(f) => {
                    sheet.write_number(r, c, *f)?;
                }
                Data::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT => {
                    sheet.write_number(r, c, *i as f64)?;
                }
                Data::Int(i) => {
                    sheet.write_string(r, c, i.to_string())?;
                }
                Data::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Data::DateTime(dt) => {
                    sheet.write_number(r, c, dt.as_f64())?;
                }
                Data::Error(e) => {
                    sheet.write_string(r, c, e.to_string())?;
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("writing workbook {:?}", path))?;
    Ok(())
}

/// Load `input`, strip annotation suffixes, save to `output`.
#[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn clean_workbook(input: &Path, output: &Path) -> Result<CleanSummary> {
    let range = read_first_sheet(input)?;
    debug!(height = range.height(), width = range.width(), "loaded sheet");

    let (rows, summary) = clean_rows(&range);
    write_sheet(&rows, range.start().unwrap_or((0, 0)), output)?;

    info!(
        rows = summary.rows,
        cleaned = summary.cleaned_cells,
        "Cleaned data saved to {}",
        output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn strips_from_first_sign() {
        assert_eq!(clean_cell("12.5+0.3"), "12.5");
        assert_eq!(clean_cell("7-1"), "7");
        assert_eq!(clean_cell("3.2±0.1"), "3.2±0.1");
        assert_eq!(clean_cell("4+1-2"), "4");
        assert_eq!(clean_cell("Rice, raw"), "Rice, raw");
        assert_eq!(clean_cell("-5"), "");
    }

    #[test]
    fn header_and_numbers_are_untouched() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Food-code".into()));
        range.set_value((0, 1), Data::String("Energy".into()));
        range.set_value((1, 0), Data::String("A001".into()));
        range.set_value((1, 1), Data::String("350+12".into()));
        range.set_value((2, 0), Data::String("A002".into()));
        range.set_value((2, 1), Data::Float(-4.5));

        let (rows, summary) = clean_rows(&range);
        assert_eq!(summary, CleanSummary { rows: 3, cleaned_cells: 1 });
        assert_eq!(rows[0][0], Data::String("Food-code".into()));
        assert_eq!(rows[1][1], Data::String("350".into()));
        assert_eq!(rows[2][1], Data::Float(-4.5));
    }

    #[test]
    fn cleans_a_workbook_on_disk() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("proximate.xlsx");
        let output = dir.path().join("cleaned.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Code")?;
        sheet.write_string(0, 1, "Protein (g)")?;
        sheet.write_string(0, 2, "Moisture")?;
        sheet.write_string(1, 0, "A001")?;
        sheet.write_string(1, 1, "7.94+0.61")?;
        sheet.write_number(1, 2, 9.93)?;
        sheet.write_string(2, 0, "A002")?;
        sheet.write_string(2, 1, "10.28-0.41")?;
        sheet.write_number(2, 2, 11.2)?;
        workbook.save(&input)?;

        let summary = clean_workbook(&input, &output)?;
        assert_eq!(summary, CleanSummary { rows: 3, cleaned_cells: 2 });

        let cleaned = read_first_sheet(&output)?;
        assert_eq!(cleaned.get_value((0, 1)), Some(&Data::String("Protein (g)".into())));
        assert_eq!(cleaned.get_value((1, 1)), Some(&Data::String("7.94".into())));
        assert_eq!(cleaned.get_value((2, 1)), Some(&Data::String("10.28".into())));
        assert_eq!(cleaned.get_value((2, 2)), Some(&Data::Float(11.2)));
        Ok(())
    }

    #[test]
    fn keeps_cells_in_place_when_sheet_starts_below_a1() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("offset.xlsx");
        let output = dir.path().join("cleaned.xlsx");

        // header at B2, one data row below it
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 1, "Code")?;
        sheet.write_string(1, 2, "Protein-total")?;
        sheet.write_string(2, 1, "A001")?;
        sheet.write_string(2, 2, "7.9+0.6")?;
        workbook.save(&input)?;

        let summary = clean_workbook(&input, &output)?;
        assert_eq!(summary, CleanSummary { rows: 2, cleaned_cells: 1 });

        let cleaned = read_first_sheet(&output)?;
        assert_eq!(cleaned.start(), Some((1, 1)));
        assert_eq!(cleaned.get_value((1, 2)), Some(&Data::String("Protein-total".into())));
        assert_eq!(cleaned.get_value((2, 1)), Some(&Data::String("A001".into())));
        assert_eq!(cleaned.get_value((2, 2)), Some(&Data::String("7.9".into())));
        Ok(())
    }

    #[test]
    fn large_integers_are_written_without_rounding() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ints.xlsx");
        let big = (1i64 << 53) + 1;

        write_sheet(&[vec![Data::Int(42), Data::Int(big)]], (0, 0), &path)?;

        let sheet = read_first_sheet(&path)?;
        assert_eq!(sheet.get_value((0, 0)), Some(&Data::Float(42.0)));
        assert_eq!(
            sheet.get_value((0, 1)),
            Some(&Data::String("9007199254740993".into()))
        );
        Ok(())
    }
}
