use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory holding the LaTeX course directories
    #[serde(default = "default_tex_dir")]
    pub tex_dir: String,

    /// Root directory the MDX documents are written to
    #[serde(default = "default_mdx_dir")]
    pub mdx_dir: String,

    /// Public directory compiled PDFs are moved into
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: String,

    /// URL path prefix under which the PDFs are served
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Bibliography file name inside each course directory
    #[serde(default = "default_bibliography_file")]
    pub bibliography_file: String,

    /// Continuous conversion settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the continuous conversion loop
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// Quiet period after the last write before a file is reconverted
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_tex_dir() -> String {
    "tex".to_string()
}

fn default_mdx_dir() -> String {
    "mdx".to_string()
}

fn default_pdf_dir() -> String {
    "public/pdfs".to_string()
}

fn default_site_url() -> String {
    "pdfs".to_string()
}

fn default_bibliography_file() -> String {
    "bibliography.bib".to_string()
}

fn default_debounce_ms() -> u64 {
    1000 // one second of quiet before reconverting
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.mdx_dir.trim().is_empty() {
            return Err(anyhow!("An MDX output directory is required"));
        }

        if self.bibliography_file.trim().is_empty() {
            return Err(anyhow!("A bibliography file name is required"));
        }

        if self.watch.debounce_ms == 0 {
            return Err(anyhow!("The debounce window must be greater than zero"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing a default one first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tex_dir: default_tex_dir(),
            mdx_dir: default_mdx_dir(),
            pdf_dir: default_pdf_dir(),
            site_url: default_site_url(),
            bibliography_file: default_bibliography_file(),
            watch: WatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
