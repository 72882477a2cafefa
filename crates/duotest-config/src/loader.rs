//! Configuration Loader
//!
//! Handles locating duotest.toml and merging environment overrides on top.

use crate::harness::{ColorChoice, HarnessConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the harness configuration file
pub const CONFIG_FILE_NAME: &str = "duotest.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Project config (./duotest.toml) - lowest priority
/// 2. Environment variables (DUOTEST_*) - overrides project
/// 3. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    _private: (),
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Harness configuration
    pub harness: HarnessConfig,

    /// The duotest.toml that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find duotest.toml. A missing file is
    /// not an error; defaults are used instead.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (config_path, harness) = self.find_harness_config(start_dir)?;
        let harness = self.apply_env_overrides(harness)?;

        Ok(Config {
            harness,
            config_path,
        })
    }

    /// Load configuration from a specific duotest.toml
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let harness = HarnessConfig::load_from_file(config_path)?;
        let harness = self.apply_env_overrides(harness)?;

        Ok(Config {
            harness,
            config_path: Some(config_path.to_path_buf()),
        })
    }

    fn find_harness_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, HarnessConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let harness = HarnessConfig::load_from_file(&config_path)?;
                return Ok((Some(config_path), harness));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, HarnessConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides to the harness config
    ///
    /// Recognised variables: `DUOTEST_COLOR` (auto/always/never) and
    /// `DUOTEST_PROGRESS` (true/1/yes, anything else is false).
    pub fn apply_env_overrides(&self, config: HarnessConfig) -> ConfigResult<HarnessConfig> {
        apply_overrides(config, |key| env::var(key).ok())
    }
}

/// Apply overrides read through `lookup`.
pub fn apply_overrides(
    mut config: HarnessConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ConfigResult<HarnessConfig> {
    if let Some(color) = lookup("DUOTEST_COLOR") {
        let color: ColorChoice = color.parse().map_err(|_| ConfigError::InvalidValue {
            field: "DUOTEST_COLOR".to_string(),
            reason: format!("expected 'auto', 'always' or 'never', got '{}'", color),
        })?;
        config.set_color(color);
    }

    if let Some(progress) = lookup("DUOTEST_PROGRESS") {
        let progress = matches!(progress.to_lowercase().as_str(), "true" | "1" | "yes");
        config.set_progress(progress);
    }

    Ok(config)
}

impl Config {
    /// Whether console markers should be coloured
    pub fn color_enabled(&self) -> bool {
        self.harness.color().enabled()
    }

    /// Whether a duotest.toml was found
    pub fn has_file(&self) -> bool {
        self.config_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_absent_leave_config() {
        let config = apply_overrides(HarnessConfig::default(), lookup_from(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_override_color() {
        let config = apply_overrides(
            HarnessConfig::default(),
            lookup_from(&[("DUOTEST_COLOR", "never")]),
        )
        .unwrap();
        assert_eq!(config.color(), ColorChoice::Never);
    }

    #[test]
    fn test_override_color_invalid() {
        let err = apply_overrides(
            HarnessConfig::default(),
            lookup_from(&[("DUOTEST_COLOR", "purple")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("DUOTEST_COLOR"));
    }

    #[test]
    fn test_override_progress_values() {
        for (value, expected) in [("1", true), ("YES", true), ("false", false), ("0", false)] {
            let config = apply_overrides(
                HarnessConfig::default(),
                lookup_from(&[("DUOTEST_PROGRESS", value)]),
            )
            .unwrap();
            assert_eq!(config.progress(), expected, "value: {}", value);
        }
    }
}
