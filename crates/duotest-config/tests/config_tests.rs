//! Configuration loading and precedence tests

use duotest_config::{
    ColorChoice, ConfigError, ConfigLoader, HarnessConfig, OutputConfig, ReportConfig,
    CONFIG_FILE_NAME,
};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(CONFIG_FILE_NAME);
    fs::write(&config_path, content).unwrap();
    config_path
}

struct EnvGuard(&'static str);

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        env::set_var(key, value);
        EnvGuard(key)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

// ============================================================================
// Loading
// ============================================================================

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    let temp_dir = TempDir::new().unwrap();

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(!config.has_file());
    assert!(config.harness.progress());
    assert!(config.harness.report_on_drop());
}

#[test]
#[serial]
fn test_load_from_subdirectory_finds_parent() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(
        temp_dir.path(),
        r#"
[output]
progress = false
"#,
    );

    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigLoader::new().load_from_directory(&nested).unwrap();

    assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    assert!(!config.harness.progress());
}

#[test]
#[serial]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
color = "always"
progress = false

[report]
on_drop = false
"#,
    );

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(
        config.harness,
        HarnessConfig {
            output: Some(OutputConfig {
                color: Some(ColorChoice::Always),
                progress: Some(false),
            }),
            report: Some(ReportConfig {
                on_drop: Some(false),
            }),
        }
    );
}

#[test]
#[serial]
fn test_load_with_empty_config() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(config.has_file());
    assert_eq!(config.harness.color(), ColorChoice::Auto);
}

#[test]
#[serial]
fn test_load_from_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join(CONFIG_FILE_NAME);

    let err = ConfigLoader::new().load_from_file(&missing).unwrap_err();

    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
#[serial]
fn test_invalid_toml_reports_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[output\ncolor = ");

    let err = ConfigLoader::new().load_from_file(&path).unwrap_err();

    match err {
        ConfigError::TomlParseError { file, .. } => assert_eq!(file, path),
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
color = "always"
progress = true
"#,
    );
    let _color = EnvGuard::set("DUOTEST_COLOR", "never");
    let _progress = EnvGuard::set("DUOTEST_PROGRESS", "0");

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.harness.color(), ColorChoice::Never);
    assert!(!config.harness.progress());
    assert!(!config.color_enabled());
}

#[test]
#[serial]
fn test_invalid_env_value_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let _color = EnvGuard::set("DUOTEST_COLOR", "rainbow");

    let err = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
