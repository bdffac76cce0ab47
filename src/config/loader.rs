//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pay
//! statement configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{PaySchedule, StatementParties};

use super::types::{PaystubConfig, ScheduleConfig};

/// File name looked up when [`ConfigLoader::load`] is given a directory.
pub const CONFIG_FILE_NAME: &str = "paystub.yaml";

/// Loads and provides access to the pay statement configuration.
///
/// # File Layout
///
/// ```text
/// config/default/
/// └── paystub.yaml   # schedule + parties
/// ```
///
/// # Example
///
/// ```no_run
/// use paystub_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let schedule = loader.schedule();
/// println!("{} pay dates", schedule.period_count());
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PaystubConfig,
    schedule: PaySchedule,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file, or from `paystub.yaml` inside
    /// a directory.
    ///
    /// The schedule section is validated here, so a loader that exists
    /// always holds a usable [`PaySchedule`].
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file is missing
    /// - [`EngineError::ConfigParseError`] if the file is not valid YAML or
    ///   is missing required fields
    /// - [`EngineError::InvalidSchedule`] if the schedule section is unusable
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let config = Self::load_yaml::<PaystubConfig>(&file)?;
        Self::from_config(config)
    }

    /// Wraps an already-parsed configuration.
    pub fn from_config(config: PaystubConfig) -> EngineResult<Self> {
        let schedule = config.schedule.build()?;
        Ok(Self { config, schedule })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PaystubConfig {
        &self.config
    }

    /// Returns the raw schedule section.
    pub fn schedule_config(&self) -> &ScheduleConfig {
        &self.config.schedule
    }

    /// Returns the validated schedule.
    pub fn schedule(&self) -> &PaySchedule {
        &self.schedule
    }

    /// Returns the party metadata.
    pub fn parties(&self) -> &StatementParties {
        &self.config.parties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bundled_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let schedule = loader.schedule();
        assert_eq!(
            schedule.anchor_date(),
            NaiveDate::from_ymd_opt(2021, 10, 28).unwrap()
        );
        assert_eq!(schedule.cadence_days(), 14);
        assert_eq!(
            schedule.end_date(),
            NaiveDate::from_ymd_opt(2025, 4, 24).unwrap()
        );
        assert_eq!(
            schedule.gross_per_period(),
            Decimal::from(90000) / Decimal::from(26)
        );
    }

    #[test]
    fn test_bundled_parties() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let parties = loader.parties();
        assert_eq!(parties.pay_method, "Electronic Transfer");
        assert_eq!(parties.deductions.len(), 5);
        assert_eq!(parties.regular_hours, Decimal::from(80));
    }

    #[test]
    fn test_load_file_path_directly() {
        let loader = ConfigLoader::load("./config/default/paystub.yaml");
        assert!(loader.is_ok());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("/nonexistent/path"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let file = write_config("schedule: [unterminated");
        match ConfigLoader::load(file.path()) {
            Err(EngineError::ConfigParseError { .. }) => {}
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_schedule_fails_at_load() {
        let file = write_config(
            r#"
schedule:
  anchor_date: 2021-10-28
  cadence_days: -14
  end_date: 2025-04-30
  gross_per_period: 1500
parties:
  employer: { name: A, address: B, phone: C }
  employee: { name: D, address: E, position: F }
  pay_method: Cheque
"#,
        );
        match ConfigLoader::load(file.path()) {
            Err(EngineError::InvalidSchedule { field, .. }) => assert_eq!(field, "cadence_days"),
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }
}
