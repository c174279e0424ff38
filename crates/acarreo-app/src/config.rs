//! Configuration management for acarreo
//!
//! Config stored at: ~/.config/acarreo/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use acarreo_domain::service::{AllocationCriteria, EngineSettings, RuleSettings};
use acarreo_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Rule thresholds and direction policy
    #[serde(default)]
    pub rules: RuleSettings,

    /// Requisition filter criteria
    #[serde(default)]
    pub allocation: AllocationCriteria,
}

/// Keys accepted by `Config::set`
pub const CONFIG_KEYS: &[&str] = &[
    "output_format",
    "near_full_ratio",
    "low_load_ratio",
    "max_age_hours",
    "direction_policy",
    "match_carrier",
];

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("acarreo");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific path, or create default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set a single value from `key=value` style input
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "output_format" => self.output_format = value.parse()?,
            "near_full_ratio" => self.rules.near_full_ratio = parse_ratio(value).ok_or_else(invalid)?,
            "low_load_ratio" => self.rules.low_load_ratio = parse_ratio(value).ok_or_else(invalid)?,
            "max_age_hours" => {
                self.rules.max_age_hours = value.trim().parse().map_err(|_| invalid())?
            }
            "direction_policy" => {
                self.rules.direction_policy = value.parse().map_err(|_| invalid())?
            }
            "match_carrier" => {
                self.allocation.match_carrier = value.trim().parse().map_err(|_| invalid())?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }

    /// Settings handed to the engine
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            rules: self.rules.clone(),
            allocation: self.allocation,
        }
    }
}

fn parse_ratio(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| (0.0..=1.0).contains(r))
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Acarreo Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Output format:     {}", self.output_format)?;
        writeln!(f, "Near-full ratio:   {:.2}", self.rules.near_full_ratio)?;
        writeln!(f, "Low-load ratio:    {:.2}", self.rules.low_load_ratio)?;
        writeln!(f, "Max age (hours):   {}", self.rules.max_age_hours)?;
        writeln!(f, "Direction policy:  {}", self.rules.direction_policy)?;
        writeln!(f, "Match carrier:     {}", self.allocation.match_carrier)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acarreo_domain::service::DirectionPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!((config.rules.near_full_ratio - 0.95).abs() < f64::EPSILON);
        assert!((config.rules.low_load_ratio - 0.10).abs() < f64::EPSILON);
        assert_eq!(config.rules.max_age_hours, 24);
        assert_eq!(config.rules.direction_policy, DirectionPolicy::AsRecorded);
        assert!(!config.allocation.match_carrier);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"rules": {"max_age_hours": 12}}"#).unwrap();
        assert_eq!(config.rules.max_age_hours, 12);
        assert!((config.rules.near_full_ratio - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set("direction_policy", "mirrored").unwrap();
        config.set("match_carrier", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("near_full_ratio", "1.5").is_err());
        assert!(config.set("max_age_hours", "-3").is_err());
        assert!(config.set("direction_policy", "sideways").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());

        config.set("output_format", "json").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
    }
}
