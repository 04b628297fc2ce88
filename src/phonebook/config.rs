use crate::error::{PhonebookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FIRST_ID: u64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

/// How generated sample rows line up with the file's columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorLayout {
    /// Every generated row carries a freshly assigned identifier.
    #[default]
    WithId,
    /// Rows start at the first-name column, as older releases wrote them.
    /// Loading reports such rows as malformed and skips them.
    WithoutId,
}

impl std::str::FromStr for GeneratorLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "with_id" | "with-id" => Ok(GeneratorLayout::WithId),
            "without_id" | "without-id" => Ok(GeneratorLayout::WithoutId),
            other => Err(format!(
                "Unknown generator layout '{}': expected with_id or without_id",
                other
            )),
        }
    }
}

impl std::fmt::Display for GeneratorLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorLayout::WithId => write!(f, "with_id"),
            GeneratorLayout::WithoutId => write!(f, "without_id"),
        }
    }
}

/// Configuration for the phonebook, stored as config.json in the config dir
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhonebookConfig {
    /// Identifier given to the first record of an empty phonebook
    #[serde(default = "default_first_id")]
    pub first_id: u64,

    /// Column alignment of generated sample rows
    #[serde(default)]
    pub generator_layout: GeneratorLayout,

    /// Log level for the log file (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_first_id() -> u64 {
    DEFAULT_FIRST_ID
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            first_id: DEFAULT_FIRST_ID,
            generator_layout: GeneratorLayout::default(),
            log_level: default_log_level(),
        }
    }
}

impl PhonebookConfig {
    pub const KEYS: [&'static str; 3] = ["first-id", "generator-layout", "log-level"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PhonebookError::Io)?;
        let config: PhonebookConfig =
            serde_json::from_str(&content).map_err(PhonebookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PhonebookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PhonebookError::Serialization)?;
        fs::write(config_path, content).map_err(PhonebookError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "first-id" => Ok(self.first_id.to_string()),
            "generator-layout" => Ok(self.generator_layout.to_string()),
            "log-level" => Ok(self.log_level.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "first-id" => {
                self.first_id = value.trim().parse().map_err(|_| {
                    PhonebookError::Api(format!("first-id must be a whole number, got '{}'", value))
                })?;
            }
            "generator-layout" => {
                self.generator_layout = value.parse().map_err(PhonebookError::Api)?;
            }
            "log-level" => {
                let level = value.trim().to_ascii_lowercase();
                if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
                    return Err(PhonebookError::Api(format!(
                        "Unsupported log level '{}': expected trace|debug|info|warn|error",
                        value
                    )));
                }
                self.log_level = level;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> PhonebookError {
    PhonebookError::Api(format!(
        "Unknown config key '{}'. Available keys: {}",
        key,
        PhonebookConfig::KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PhonebookConfig::default();
        assert_eq!(config.first_id, 1);
        assert_eq!(config.generator_layout, GeneratorLayout::WithId);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = PhonebookConfig::load(dir.path().join("missing")).unwrap();
        assert_eq!(config, PhonebookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = PhonebookConfig::default();
        config.set("first-id", "0").unwrap();
        config.set("generator-layout", "without_id").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = PhonebookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.first_id, 0);
        assert_eq!(loaded.generator_layout, GeneratorLayout::WithoutId);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"first_id": 100}"#).unwrap();
        let loaded = PhonebookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.first_id, 100);
        assert_eq!(loaded.log_level, "info");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = PhonebookConfig::default();
        assert!(config.set("first-id", "-3").is_err());
        assert!(config.set("log-level", "loud").is_err());
        assert!(config.set("color", "red").is_err());
        assert!(config.get("color").is_err());
        assert_eq!(config, PhonebookConfig::default());
    }
}
