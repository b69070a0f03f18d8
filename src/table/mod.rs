// src/table/mod.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::SplitError;

static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
pub(crate) static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
pub(crate) static HEADER_CELL: Lazy<Selector> = Lazy::new(|| selector("th"));
pub(crate) static DATA_CELL: Lazy<Selector> = Lazy::new(|| selector("td"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector should parse")
}

/// The header row of a table: the `<th>` labels plus their original markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub cells: Vec<String>,
    /// Concatenated `<th>` elements, without the enclosing `<tr>`.
    pub html: String,
}

impl Header {
    pub fn from_cells(cells: Vec<String>) -> Self {
        let html = cells
            .iter()
            .map(|c| format!("<th>{}</th>", escape_text(c)))
            .collect();
        Self { cells, html }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One data row of the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position among the data rows.
    pub index: usize,
    /// Trimmed text of each `<td>`.
    pub cells: Vec<String>,
    /// The whole `<tr>` element as it appeared in the source.
    pub html: String,
}

impl Row {
    pub fn from_cells(index: usize, cells: Vec<String>) -> Self {
        let inner: String = cells
            .iter()
            .map(|c| format!("<td>{}</td>", escape_text(c)))
            .collect();
        Self {
            index,
            html: format!("<tr>{}</tr>", inner),
            cells,
        }
    }

    /// The food code cell, or `EmptyRow` when the row has no cells at all.
    pub fn first_cell(&self) -> Result<&str, SplitError> {
        self.cells
            .first()
            .map(String::as_str)
            .ok_or(SplitError::EmptyRow { row: self.index })
    }
}

/// A single flat table: one header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDocument {
    pub header: Header,
    pub rows: Vec<Row>,
}

impl TableDocument {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, SplitError> {
        if header.is_empty() {
            return Err(SplitError::EmptyDocument);
        }
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row::from_cells(i + 1, cells))
            .collect();
        Ok(Self {
            header: Header::from_cells(header),
            rows,
        })
    }

    /// Parse the first `<table>` of an HTML document.
    ///
    /// The first `<tr>` must carry `<th>` cells; every later `<tr>` is a data
    /// row whose `<td>` texts are collected. Rows are kept even when they have
    /// no `<td>`, so classification can reject them by position.
    #[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
    pub fn parse(html: &str) -> Result<Self, SplitError> {
        let doc = Html::parse_document(html);
        let table = doc.select(&TABLE).next().ok_or(SplitError::EmptyDocument)?;

        let mut trs = table.select(&ROW);
        let header_row = trs.next().ok_or(SplitError::EmptyDocument)?;
        let ths: Vec<ElementRef> = header_row.select(&HEADER_CELL).collect();
        if ths.is_empty() {
            return Err(SplitError::EmptyDocument);
        }
        let header = Header {
            cells: ths.iter().map(|th| cell_text(*th)).collect(),
            html: ths.iter().map(|th| th.html()).collect(),
        };

        let rows: Vec<Row> = trs
            .enumerate()
            .map(|(i, tr)| Row {
                index: i + 1,
                cells: tr.select(&DATA_CELL).map(cell_text).collect(),
                html: tr.html(),
            })
            .collect();

        debug!(columns = header.len(), rows = rows.len(), "parsed table");
        Ok(Self { header, rows })
    }
}

pub(crate) fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Escape text for use inside an element body.
pub(crate) fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
