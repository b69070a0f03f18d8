// src/categorize/split.rs
use super::{CategoryKey, Categorizer};
use crate::table::{escape_text, Header, Row};

/// One category's slice of the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    pub key: CategoryKey,
    /// Category name shown in the title row.
    pub title: String,
    /// Column span of the title row; always the header's cell count.
    pub column_span: usize,
    pub header: Header,
    pub rows: Vec<Row>,
}

impl SplitDocument {
    /// Title row, then the original header row, then the group's rows.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<table><tr><th colspan=\"{}\">{}</th></tr><tr>{}</tr>",
            self.column_span,
            escape_text(&self.title),
            self.header.html
        );
        for row in &self.rows {
            html.push_str(&row.html);
        }
        html.push_str("</table>");
        html
    }

    /// File stem for the split at 1-based `position`, e.g. `01_cereals_and_millets`.
    pub fn file_stem(&self, position: usize) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for ch in self.title.chars() {
            if ch.is_alphanumeric() {
                slug.extend(ch.to_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        format!("{:02}_{}", position, slug.trim_matches('_'))
    }
}

impl Categorizer<'_> {
    /// Build the split document for one category group.
    pub fn render_group(&self, key: CategoryKey, rows: Vec<Row>, header: &Header) -> SplitDocument {
        SplitDocument {
            title: self.categories.name_for(&key).to_string(),
            column_span: header.len(),
            header: header.clone(),
            key,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::{CategoryTable, UNKNOWN_CATEGORY};

    fn header() -> Header {
        Header::from_cells(vec!["Code".into(), "Name".into(), "Energy".into()])
    }

    #[test]
    fn title_spans_every_header_column() {
        let table = CategoryTable::default();
        let rows = vec![Row::from_cells(1, vec!["A001".into(), "Rice".into(), "350".into()])];
        let split = Categorizer::new(&table).render_group(CategoryKey::new("A"), rows, &header());

        assert_eq!(split.column_span, 3);
        assert_eq!(
            split.to_html(),
            "<table><tr><th colspan=\"3\">CEREALS AND MILLETS</th></tr>\
             <tr><th>Code</th><th>Name</th><th>Energy</th></tr>\
             <tr><td>A001</td><td>Rice</td><td>350</td></tr></table>"
        );
    }

    #[test]
    fn unknown_key_gets_placeholder_title() {
        let table = CategoryTable::default();
        let split = Categorizer::new(&table).render_group(CategoryKey::new("G"), vec![], &header());
        assert_eq!(split.title, UNKNOWN_CATEGORY);
        assert!(split.to_html().contains(">UNKNOWN CATEGORY</th>"));
    }

    #[test]
    fn file_stem_is_a_slug() {
        let table = CategoryTable::default();
        let split =
            Categorizer::new(&table).render_group(CategoryKey::new("G001 to G018"), vec![], &header());
        assert_eq!(split.file_stem(7), "07_condiments_and_spices_fresh");
    }
}
