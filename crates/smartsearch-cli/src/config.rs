use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smartsearch_core::SearchConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::cli::Cli;

/// Default simulated lookup latency, in milliseconds
pub const DEFAULT_LATENCY_MS: u64 = 300;

/// Colour theme for the terminal search box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Controller settings
    pub search: SearchConfig,

    /// Hint shown in the empty input
    pub placeholder: String,

    /// Colour theme
    pub theme: Theme,

    /// Simulated lookup latency in milliseconds
    pub latency_ms: u64,

    /// Give up on a lookup after this many milliseconds
    pub lookup_timeout_ms: Option<u64>,

    /// JSON catalog replacing the built-in records
    pub catalog: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            placeholder: "Search...".to_string(),
            theme: Theme::default(),
            latency_ms: DEFAULT_LATENCY_MS,
            lookup_timeout_ms: None,
            catalog: None,
        }
    }
}

impl CliConfig {
    /// Resolve configuration: explicit file, else the default location if
    /// present, else defaults; command-line overrides win.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(cli);
        config
            .search
            .validate()
            .context("Invalid search configuration")?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `<config_dir>/smartsearch/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smartsearch").join("config.toml"))
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(debounce_ms) = cli.debounce_ms {
            self.search.debounce_ms = debounce_ms;
        }
        if let Some(escape) = cli.escape {
            self.search.escape = escape.into();
        }
        if let Some(latency_ms) = cli.latency_ms {
            self.latency_ms = latency_ms;
        }
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if let Some(catalog) = &cli.catalog {
            self.catalog = Some(catalog.clone());
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}
