//! Harness Configuration (duotest.toml)
//!
//! Controls how the harness writes its console output and when suites emit
//! their final report.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::path::Path;
use std::str::FromStr;

/// Harness configuration from duotest.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Console output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Suite report settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

/// Console output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// When to colour PASSED/FAILED markers (default: auto)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,

    /// Print a `Running <name>...` line before each test (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
}

/// Suite report settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Emit the summary when a suite is dropped (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_drop: Option<bool>,
}

/// Colour policy for console markers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the policy against the environment and stdout.
    pub fn enabled(self) -> bool {
        self.resolve(
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        )
    }

    /// Resolve the policy given whether `NO_COLOR` is set and whether
    /// output goes to a terminal.
    pub fn resolve(self, no_color: bool, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !no_color && is_terminal,
        }
    }

    /// The forced setting, if the policy is not `Auto`
    pub fn forced(self) -> Option<bool> {
        match self {
            ColorChoice::Always => Some(true),
            ColorChoice::Never => Some(false),
            ColorChoice::Auto => None,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(ConfigError::InvalidValue {
                field: "output.color".to_string(),
                reason: format!("expected 'auto', 'always' or 'never', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(name)
    }
}

impl HarnessConfig {
    /// Load harness configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::TomlParseError { error, .. } => ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse harness configuration from TOML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: Default::default(),
            error: e,
        })
    }

    /// Effective colour policy
    pub fn color(&self) -> ColorChoice {
        self.output
            .as_ref()
            .and_then(|o| o.color)
            .unwrap_or_default()
    }

    /// Whether `Running <name>...` lines are printed
    pub fn progress(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.progress)
            .unwrap_or(true)
    }

    /// Whether a suite reports itself when dropped
    pub fn report_on_drop(&self) -> bool {
        self.report
            .as_ref()
            .and_then(|r| r.on_drop)
            .unwrap_or(true)
    }

    /// Override the colour policy
    pub fn set_color(&mut self, color: ColorChoice) {
        self.output.get_or_insert_with(Default::default).color = Some(color);
    }

    /// Override the progress switch
    pub fn set_progress(&mut self, progress: bool) {
        self.output.get_or_insert_with(Default::default).progress = Some(progress);
    }

    /// Override the report-on-drop switch
    pub fn set_report_on_drop(&mut self, on_drop: bool) {
        self.report.get_or_insert_with(Default::default).on_drop = Some(on_drop);
    }
}
