/*!
 * Tests for application configuration functionality
 */

use std::fs;
use anyhow::Result;
use notes::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.tex_dir, "tex");
    assert_eq!(config.mdx_dir, "mdx");
    assert_eq!(config.pdf_dir, "public/pdfs");
    assert_eq!(config.site_url, "pdfs");
    assert_eq!(config.bibliography_file, "bibliography.bib");
    assert_eq!(config.watch.debounce_ms, 1000);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.mdx_dir = "  ".to_string();
    assert!(config.validate().is_err());
    config.mdx_dir = "mdx".to_string();

    config.bibliography_file = String::new();
    assert!(config.validate().is_err());
    config.bibliography_file = "refs.bib".to_string();

    config.watch.debounce_ms = 0;
    assert!(config.validate().is_err());
    config.watch.debounce_ms = 250;

    assert!(config.validate().is_ok());
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("notes.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.mdx_dir, "mdx");

    let written: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written.site_url, config.site_url);

    Ok(())
}

/// Test that missing fields fall back to their defaults
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "notes.json",
        r#"{ "mdx_dir": "site/src/content/docs", "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.mdx_dir, "site/src/content/docs");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.tex_dir, "tex");
    assert_eq!(config.watch.debounce_ms, 1000);

    Ok(())
}

/// Test that malformed JSON is rejected
#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());

    Ok(())
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
