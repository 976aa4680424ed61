//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or the platform config directory)
//! 3. `BAGDUPE_*` environment variables
//! 4. CLI flags (applied by the caller)
//!
//! ```toml
//! algorithm = "sha256"
//! malformed_lines = "fail"
//! delete_method = "trash"
//! output = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DeleteMethod;
use crate::manifest::{HashAlgorithm, MalformedLinePolicy};
use crate::output::OutputFormat;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "BAGDUPE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Payload manifest algorithm; `None` uses the lookup order (md5 first)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<HashAlgorithm>,
    /// Handling of malformed manifest lines
    pub malformed_lines: MalformedLinePolicy,
    /// How files are removed with `--execute`
    pub delete_method: DeleteMethod,
    /// Report format for report-only runs
    pub output: OutputFormat,
}

impl Config {
    /// Load the configuration.
    ///
    /// With `path` set, the file must exist. Without it, the default
    /// platform-specific file is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing, or if any
    /// layer holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    anyhow::bail!("config file not found: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => Self::config_path().filter(|p| p.is_file()),
        };

        if let Some(file) = &file {
            log::debug!("Loading config from {}", file.display());
        }

        Self::figment(file.as_deref())
            .extract()
            .context("invalid configuration")
    }

    /// Build the layered figment for an optional config file.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "bagdupe", "bagdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
