// src/categorize/categories.rs
use std::collections::BTreeMap;

use super::CategoryKey;

/// Title used for any key the table does not know about.
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN CATEGORY";

static DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("A", "CEREALS AND MILLETS"),
    ("B", "GRAIN LEGUMES"),
    ("C", "GREEN LEAFY VEGETABLES"),
    ("D", "OTHER VEGETABLES"),
    ("E", "FRUITS"),
    ("F", "ROOTS AND TUBERS"),
    ("G001 to G018", "CONDIMENTS AND SPICES-FRESH"),
    ("G019 to G033", "CONDIMENTS AND SPICES-DRY"),
    ("H", "NUTS AND OIL SEEDS"),
    ("I", "SUGARS"),
    ("J", "MUSHROOMS"),
    ("K", "MISCELLANEOUS FOODS"),
    ("L", "MILK AND MILK PRODUCTS"),
    ("M", "EGG AND EGG PRODUCTS"),
    ("N", "POULTRY"),
    ("O", "ANIMAL FAT"),
    ("P", "MARINE FISH"),
    ("Q", "MARINE SHELLFISH"),
    ("R", "MARINE MOLLUSKS"),
    ("S", "FRESHWATER FISH AND SHELLFISH"),
];

/// Immutable lookup from category key to its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable(BTreeMap<String, String>);

impl Default for CategoryTable {
    fn default() -> Self {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for CategoryTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl CategoryTable {
    /// Display name for `key`, falling back to [`UNKNOWN_CATEGORY`].
    pub fn name_for(&self, key: &CategoryKey) -> &str {
        self.0
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// A copy of this table with `overrides` layered on top.
    pub fn merged(&self, overrides: &BTreeMap<String, String>) -> Self {
        let mut map = self.0.clone();
        map.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_g_sub_ranges() {
        let table = CategoryTable::default();
        assert_eq!(table.len(), 20);
        assert_eq!(
            table.name_for(&CategoryKey::new("G001 to G018")),
            "CONDIMENTS AND SPICES-FRESH"
        );
        assert_eq!(
            table.name_for(&CategoryKey::new("G019 to G033")),
            "CONDIMENTS AND SPICES-DRY"
        );
    }

    #[test]
    fn unknown_keys_fall_back() {
        let table = CategoryTable::default();
        assert_eq!(table.name_for(&CategoryKey::new("G")), UNKNOWN_CATEGORY);
        assert_eq!(table.name_for(&CategoryKey::new("Z")), UNKNOWN_CATEGORY);
    }

    #[test]
    fn overrides_replace_and_add() {
        let overrides = BTreeMap::from([
            ("A".to_string(), "CEREALS".to_string()),
            ("T".to_string(), "BEVERAGES".to_string()),
        ]);
        let table = CategoryTable::default().merged(&overrides);
        assert_eq!(table.name_for(&CategoryKey::new("A")), "CEREALS");
        assert_eq!(table.name_for(&CategoryKey::new("T")), "BEVERAGES");
        assert_eq!(table.name_for(&CategoryKey::new("B")), "GRAIN LEGUMES");
    }
}
