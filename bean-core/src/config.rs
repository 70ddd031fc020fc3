//! Configuration for the Bean engine and farm session.
//!
//! Maps directly to `bean.toml`. Every section and key is optional.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [engine]
//! seed = 42
//!
//! [data]
//! source = "directory"
//! directory = "data"
//!
//! [session]
//! turns_per_day = 5
//!
//! [session.end_of_day]
//! HUNGER = 5
//! STRESS = 5
//! MOTIVATION = -5
//! HAPPY = -3
//!
//! [persistence]
//! path = "bean_save.db"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::delta::EmotionDeltas;
use crate::emotion::Emotion;

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeanConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Where action tables come from.
    #[serde(default)]
    pub data: DataConfig,
    /// Day/turn pacing of a farm session.
    #[serde(default)]
    pub session: SessionConfig,
    /// Save file settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl BeanConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `BeanError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| crate::BeanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.session.turns_per_day == 0 {
            return Err(crate::BeanError::Config(
                "session.turns_per_day must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Which [`crate::ActionSource`] backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Tables compiled into the binary.
    #[default]
    Embedded,
    /// CSV files read from `data.directory`.
    Directory,
}

/// Action data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Source kind.
    #[serde(default)]
    pub source: DataSourceKind,
    /// Directory holding `kind.csv`, `lazy.csv`, `snappy.csv`.
    #[serde(default = "default_data_dir")]
    pub directory: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::Embedded,
            directory: default_data_dir(),
        }
    }
}

/// Farm session pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns before the day ends.
    #[serde(default = "default_5")]
    pub turns_per_day: u32,
    /// Emotion deltas applied when a day ends.
    #[serde(default = "default_end_of_day")]
    pub end_of_day: EmotionDeltas,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turns_per_day: 5,
            end_of_day: default_end_of_day(),
        }
    }
}

/// Save file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// SQLite database path.
    #[serde(default = "default_save_path")]
    pub path: PathBuf,
    /// Use WAL journaling.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Detect save corruption via checksums.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: default_save_path(),
            wal_mode: true,
            checksum_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_5() -> u32 { 5 }
fn default_log_level() -> String { "info".to_string() }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_save_path() -> PathBuf { PathBuf::from("bean_save.db") }

fn default_end_of_day() -> EmotionDeltas {
    EmotionDeltas::from([
        (Emotion::Hunger, 5),
        (Emotion::Stress, 5),
        (Emotion::Motivation, -5),
        (Emotion::Happy, -3),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = BeanConfig::from_toml("").expect("empty");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.engine.seed, None);
        assert_eq!(config.data.source, DataSourceKind::Embedded);
        assert_eq!(config.session.turns_per_day, 5);
        assert_eq!(config.session.end_of_day[&Emotion::Happy], -3);
        assert_eq!(config.persistence.path, PathBuf::from("bean_save.db"));
        assert!(config.persistence.checksum_enabled);
    }

    #[test]
    fn partial_sections_override_only_their_keys() {
        let config = BeanConfig::from_toml(
            r#"
            [engine]
            seed = 9

            [session]
            turns_per_day = 3

            [session.end_of_day]
            HUNGER = 10
            "#,
        )
        .expect("parse");
        assert_eq!(config.engine.seed, Some(9));
        assert_eq!(config.session.turns_per_day, 3);
        assert_eq!(config.session.end_of_day.len(), 1);
        assert_eq!(config.session.end_of_day[&Emotion::Hunger], 10);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            BeanConfig::from_toml("[engine\nseed = "),
            Err(crate::BeanError::Config(_))
        ));
        assert!(matches!(
            BeanConfig::from_toml("[data]\nsource = \"ftp\""),
            Err(crate::BeanError::Config(_))
        ));
        assert!(matches!(
            BeanConfig::from_toml("[session]\nturns_per_day = 0"),
            Err(crate::BeanError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BeanConfig::from_file(std::path::Path::new("/definitely/not/bean.toml"))
            .expect_err("missing");
        assert!(matches!(err, crate::BeanError::Io(_)));
    }
}
