use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mm_metrics::{DateField, DEFAULT_PERIOD_DAYS};

/// Report settings read from an optional JSON file. Missing keys keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub default_period_days: u32,
    pub date_field: DateField,
    pub log_stats: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_period_days: DEFAULT_PERIOD_DAYS,
            date_field: DateField::Opened,
            log_stats: true,
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: ReportConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(cfg.default_period_days > 0, "defaultPeriodDays must be positive");
        Ok(cfg)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dateField": "completed"}}"#).unwrap();
        let cfg = ReportConfig::load(file.path()).unwrap();
        assert_eq!(cfg.date_field, DateField::Completed);
        assert_eq!(cfg.default_period_days, 30);
        assert!(cfg.log_stats);
    }

    #[test]
    fn rejects_zero_period() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"defaultPeriodDays": 0}}"#).unwrap();
        assert!(ReportConfig::load(file.path()).is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(ReportConfig::load_or_default(None).unwrap(), ReportConfig::default());
    }
}
