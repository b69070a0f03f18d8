// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs::File, path::Path};
use tracing::debug;

use crate::categorize::CategoryTable;

/// Optional YAML settings for the categorizer.
///
/// ```yaml
/// replace_defaults: false
/// categories:
///   T: BEVERAGES
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    /// Start from an empty table instead of the built-in food categories.
    pub replace_defaults: bool,
    pub categories: BTreeMap<String, String>,
}

impl SplitConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening config {:?}", path))?;
        let cfg: Self = serde_yaml::from_reader(file)
            .with_context(|| format!("parsing config {:?}", path))?;
        debug!(
            categories = cfg.categories.len(),
            replace_defaults = cfg.replace_defaults,
            "loaded config"
        );
        Ok(cfg)
    }

    pub fn category_table(&self) -> CategoryTable {
        if self.replace_defaults {
            self.categories
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        } else {
            CategoryTable::default().merged(&self.categories)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(SplitConfig::default().category_table(), CategoryTable::default());
    }

    #[test]
    fn loads_overrides_from_yaml() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "categories:\n  T: BEVERAGES\n  A: CEREALS")?;

        let cfg = SplitConfig::load(tmp.path())?;
        let table = cfg.category_table();
        assert_eq!(table.name_for(&CategoryKey::new("T")), "BEVERAGES");
        assert_eq!(table.name_for(&CategoryKey::new("A")), "CEREALS");
        assert_eq!(table.len(), 21);
        Ok(())
    }

    #[test]
    fn replace_defaults_drops_builtin_names() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "replace_defaults: true\ncategories:\n  T: BEVERAGES")?;

        let table = SplitConfig::load(tmp.path())?.category_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.name_for(&CategoryKey::new("A")), "UNKNOWN CATEGORY");
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "categoriez: {{}}")?;
        assert!(SplitConfig::load(tmp.path()).is_err());
        Ok(())
    }
}
