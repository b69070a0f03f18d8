// src/categorize/mod.rs
pub mod categories;
pub mod split;

use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;
use tracing::{debug, info, instrument, trace};

use crate::error::SplitError;
use crate::table::{Row, TableDocument};

pub use categories::{CategoryTable, UNKNOWN_CATEGORY};
pub use split::SplitDocument;

/// Key for fresh condiments and spices, codes G001..=G018.
pub const G_FRESH: &str = "G001 to G018";
/// Key for dry condiments and spices, codes G019..=G033.
pub const G_DRY: &str = "G019 to G033";

/// A category bucket. Ordering is plain string ordering, which is also the
/// order split documents are emitted in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the category key of a data row from its food code.
///
/// The key is the code's first character, except for `G` codes, which are
/// split on their numeric part into [`G_FRESH`] and [`G_DRY`]. A `G` code
/// outside both ranges keeps the plain `G` key.
pub fn classify(row: &Row) -> Result<CategoryKey, SplitError> {
    let code = row.first_cell()?;
    let malformed = || SplitError::MalformedFoodCode {
        row: row.index,
        code: code.to_string(),
    };

    let mut chars = code.chars();
    let prefix = chars.next().ok_or_else(malformed)?;
    if prefix != 'G' {
        return Ok(CategoryKey(prefix.to_string()));
    }

    // Numbers too large for i64 fall outside both sub-ranges.
    let number = match chars.as_str().trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => None,
        Err(_) => return Err(malformed()),
    };
    let key = match number {
        Some(1..=18) => G_FRESH.to_string(),
        Some(19..=33) => G_DRY.to_string(),
        _ => prefix.to_string(),
    };
    trace!(code, number = ?number, key = %key, "classified G code");
    Ok(CategoryKey(key))
}

/// Bucket rows by category key, keeping source order inside each bucket.
///
/// Fails on the first row that cannot be classified; no partial result is
/// returned.
pub fn partition(rows: Vec<Row>) -> Result<BTreeMap<CategoryKey, Vec<Row>>, SplitError> {
    let mut groups: BTreeMap<CategoryKey, Vec<Row>> = BTreeMap::new();
    for row in rows {
        let key = classify(&row)?;
        groups.entry(key).or_default().push(row);
    }
    Ok(groups)
}

/// Splits a reference table into one document per food category.
pub struct Categorizer<'a> {
    categories: &'a CategoryTable,
}

impl<'a> Categorizer<'a> {
    pub fn new(categories: &'a CategoryTable) -> Self {
        Self { categories }
    }

    #[instrument(level = "info", skip(self, document), fields(rows = document.rows.len()))]
    pub fn split_table(&self, document: TableDocument) -> Result<Vec<SplitDocument>, SplitError> {
        let TableDocument { header, rows } = document;
        if header.is_empty() {
            return Err(SplitError::EmptyDocument);
        }

        let groups = partition(rows)?;
        let splits: Vec<SplitDocument> = groups
            .into_iter()
            .map(|(key, rows)| {
                debug!(key = %key, rows = rows.len(), "rendering group");
                self.render_group(key, rows, &header)
            })
            .collect();

        info!(categories = splits.len(), "split table");
        Ok(splits)
    }
}
