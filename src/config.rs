use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Inputs for the ownership tour. Every field has a default, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TourConfig {
    pub list: ListSection,
    pub cell: CellSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListSection {
    /// Inserted at the head in this order, so they read back reversed.
    pub values: Vec<i32>,
    pub advance_by: usize,
}

impl Default for ListSection {
    fn default() -> Self {
        Self {
            values: vec![6, 5, 4, 3, 2, 1],
            advance_by: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellSection {
    pub age: u32,
    pub tags: Vec<String>,
}

impl Default for CellSection {
    fn default() -> Self {
        Self {
            age: 15445,
            tags: vec!["andy".to_string(), "pavlo".to_string()],
        }
    }
}

impl TourConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TourConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The bulk advance must land on a node, never on or past the end.
    pub fn validate(&self) -> Result<()> {
        let len = self.list.values.len();
        if len == 0 {
            if self.list.advance_by != 0 {
                return Err(Error::invalid_config(
                    "list.advance_by",
                    "must be 0 when list.values is empty",
                ));
            }
        } else if self.list.advance_by >= len {
            return Err(Error::invalid_config(
                "list.advance_by",
                format!("{} must be smaller than {}", self.list.advance_by, len),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TourConfig::from_toml_str("").unwrap();
        assert_eq!(config, TourConfig::default());
        assert_eq!(config.list.values, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(config.cell.tags, vec!["andy", "pavlo"]);
    }

    #[test]
    fn test_partial_sections_fill_in_defaults() {
        let config = TourConfig::from_toml_str(
            r#"
            [list]
            values = [10, 20, 30]

            [cell]
            age = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.list.values, vec![10, 20, 30]);
        assert_eq!(config.list.advance_by, 2);
        assert_eq!(config.cell.age, 42);
        assert_eq!(config.cell.tags, vec!["andy", "pavlo"]);
    }

    #[test]
    fn test_advance_past_last_value_rejected() {
        let err = TourConfig::from_toml_str("[list]\nvalues = [1, 2]\nadvance_by = 2\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "list.advance_by"));
    }

    #[test]
    fn test_empty_list_requires_zero_advance() {
        assert!(TourConfig::from_toml_str("[list]\nvalues = []\nadvance_by = 0\n").is_ok());
        assert!(TourConfig::from_toml_str("[list]\nvalues = []\nadvance_by = 1\n").is_err());
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = TourConfig::from_toml_str("[cell]\nage = \"old\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let err = TourConfig::from_toml_str("[cell]\nnicknames = []\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[cell]\ntags = [\"ferris\"]").unwrap();

        let config = TourConfig::load(file.path()).unwrap();
        assert_eq!(config.cell.tags, vec!["ferris"]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TourConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
