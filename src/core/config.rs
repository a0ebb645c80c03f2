//! Configuration - table layout and analysis thresholds
//!
//! Configuration is read from a YAML file. Lookup order:
//! 1. an explicit path (`--config`)
//! 2. `sternum.yaml` in the working directory
//! 3. `config.yaml` in the user config directory
//! 4. built-in defaults
//!
//! Every field is optional; missing fields fall back to their defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::AnalyzerError;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "sternum.yaml";

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub analysis: AnalysisConfig,
}

/// How to read the measurement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// 1-based row holding the column headers
    pub header_row: usize,

    /// Field delimiter
    pub delimiter: char,

    /// Header of the minimum-width column
    pub min_column: String,

    /// Header of the maximum-width column
    pub max_column: String,

    /// Optional header of a subject id column, used to label rows
    pub id_column: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_row: 2,
            delimiter: ',',
            min_column: "b(sternal Thickness)MIN".to_string(),
            max_column: "MAX".to_string(),
            id_column: None,
        }
    }
}

/// Thresholds and knobs for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows with `range_width >= large_range_mm` are flagged
    pub large_range_mm: f64,

    /// Rows with `mean_width <= too_narrow_mm` are flagged
    pub too_narrow_mm: f64,

    /// Standard deviations below this are "low variability"
    pub low_variability_mm: f64,

    /// Standard deviations above this are "high variability"
    pub high_variability_mm: f64,

    /// Significance level for both normality tests
    pub alpha: f64,

    /// Histogram bin count for chart series
    pub histogram_bins: usize,

    /// Seed for the synthetic normal sample; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            large_range_mm: 8.0,
            too_narrow_mm: 4.0,
            low_variability_mm: 3.0,
            high_variability_mm: 7.0,
            alpha: 0.05,
            histogram_bins: 20,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration, returning it together with the file it came from
    ///
    /// An explicit path must exist and parse. Discovered files that fail to
    /// parse are errors too; a missing discovered file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), AnalyzerError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(),
        };

        match path {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok((config, Some(path)))
            }
            None => {
                tracing::debug!("no configuration file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self, AnalyzerError> {
        let contents = fs::read_to_string(path).map_err(|e| AnalyzerError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_yaml(&contents).map_err(|message| AnalyzerError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(contents).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the pipeline meaningless
    pub fn validate(&self) -> Result<(), String> {
        if self.table.header_row == 0 {
            return Err("table.header_row is 1-based and must be at least 1".to_string());
        }
        if self.table.min_column.trim().is_empty() || self.table.max_column.trim().is_empty() {
            return Err("table.min_column and table.max_column must not be empty".to_string());
        }
        if !self.table.delimiter.is_ascii() {
            return Err(format!(
                "table.delimiter must be a single ASCII character, got '{}'",
                self.table.delimiter
            ));
        }
        let a = &self.analysis;
        if !(a.alpha > 0.0 && a.alpha < 1.0) {
            return Err(format!("analysis.alpha must be in (0, 1), got {}", a.alpha));
        }
        if a.low_variability_mm > a.high_variability_mm {
            return Err(format!(
                "analysis.low_variability_mm ({}) is above analysis.high_variability_mm ({})",
                a.low_variability_mm, a.high_variability_mm
            ));
        }
        if a.histogram_bins == 0 {
            return Err("analysis.histogram_bins must be at least 1".to_string());
        }
        Ok(())
    }

    /// Find a configuration file without reading it
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sternum").map(|dirs| dirs.config_dir().join("config.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table.header_row, 2);
        assert_eq!(config.table.delimiter, ',');
        assert_eq!(config.table.min_column, "b(sternal Thickness)MIN");
        assert_eq!(config.table.max_column, "MAX");
        assert_eq!(config.analysis.large_range_mm, 8.0);
        assert_eq!(config.analysis.too_narrow_mm, 4.0);
        assert_eq!(config.analysis.alpha, 0.05);
        assert_eq!(config.analysis.histogram_bins, 20);
        assert!(config.analysis.seed.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("analysis:\n  seed: 42\n  large_range_mm: 6.5\n").unwrap();
        assert_eq!(config.analysis.seed, Some(42));
        assert_eq!(config.analysis.large_range_mm, 6.5);
        assert_eq!(config.analysis.too_narrow_mm, 4.0);
        assert_eq!(config.table, TableConfig::default());
    }

    #[test]
    fn test_table_section() {
        let yaml = "table:\n  header_row: 1\n  delimiter: ';'\n  min_column: MIN\n  id_column: Patient\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.table.header_row, 1);
        assert_eq!(config.table.delimiter, ';');
        assert_eq!(config.table.min_column, "MIN");
        assert_eq!(config.table.max_column, "MAX");
        assert_eq!(config.table.id_column.as_deref(), Some("Patient"));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("   \n").unwrap(), Config::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(Config::from_yaml("table:\n  header_row: 0\n").is_err());
        assert!(Config::from_yaml("analysis:\n  alpha: 1.5\n").is_err());
        assert!(Config::from_yaml("analysis:\n  histogram_bins: 0\n").is_err());
        assert!(Config::from_yaml(
            "analysis:\n  low_variability_mm: 9\n  high_variability_mm: 7\n"
        )
        .is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("custom.yaml");
        fs::write(&path, "analysis:\n  too_narrow_mm: 3.5\n").unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(config.analysis.too_narrow_mm, 3.5);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nope.yaml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config { .. }));
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "analysis: [not, a, map]\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }
}
