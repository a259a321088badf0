//! Controller configuration.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default quiet period before a lookup is dispatched.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Upper bound for the quiet period.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// What the Escape key does while the dropdown is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeBehavior {
    /// Clear the highlight and close the dropdown.
    #[default]
    Close,
    /// Only clear the highlight; the dropdown stays open.
    Unhighlight,
}

impl std::str::FromStr for EscapeBehavior {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "unhighlight" => Ok(Self::Unhighlight),
            other => Err(SearchError::Config(format!(
                "unknown escape behavior '{other}' (expected 'close' or 'unhighlight')"
            ))),
        }
    }
}

/// Tunables for [`SearchController`](crate::SearchController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period in milliseconds.
    pub debounce_ms: u64,
    /// Escape key policy.
    pub escape: EscapeBehavior,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            escape: EscapeBehavior::default(),
        }
    }
}

impl SearchConfig {
    /// Quiet period as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Builder-style override of the quiet period.
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Builder-style override of the Escape policy.
    pub fn with_escape(mut self, escape: EscapeBehavior) -> Self {
        self.escape = escape;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 || self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SearchError::Config(format!(
                "debounce_ms must be between 1 and {MAX_DEBOUNCE_MS}, got {}",
                self.debounce_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
