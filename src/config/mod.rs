//! Configuration management for classroll

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::Expiry;
use crate::error::{ConfigError, Result};
use crate::history::ReconcilePolicy;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// GitHub API base URL
    pub api_base: String,

    /// Host serving raw purview manifests
    pub purview_root: String,

    /// Prefix for links to rendered blocks
    pub blocks_run_root: String,

    /// Development mode: cached entries never expire
    pub development: bool,

    /// Cache expiry in seconds (ignored in development mode)
    pub cache_ttl_secs: u64,

    /// Timeout applied to every outbound request
    pub request_timeout_secs: u64,

    /// Handle -> display name mapping
    pub names_path: PathBuf,

    /// Directory holding `<assignment>.json` descriptors
    pub assignments_dir: PathBuf,

    /// Address the HTTP server binds to
    pub bind: String,

    /// Reconciliation policy used when a request does not name one
    pub default_policy: ReconcilePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base: "https://api.github.com".to_string(),
            purview_root: "http://purview-blocks.herokuapp.com".to_string(),
            blocks_run_root: "https://bl.ocks.org/".to_string(),
            development: false,
            cache_ttl_secs: 5 * 60,
            request_timeout_secs: 30,
            names_path: PathBuf::from("names.json"),
            assignments_dir: PathBuf::from("."),
            bind: "127.0.0.1:5000".to_string(),
            default_policy: ReconcilePolicy::Full,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::Invalid(
            "Could not determine config directory".to_string(),
        ))?;

        Ok(base.join("classroll").join("config.yaml"))
    }

    /// Resolve the config path that `load_at` would read
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path, or the default path.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    log::debug!("No config at {}, using defaults", default.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Cache expiry derived from the mode and TTL
    pub fn cache_expiry(&self) -> Expiry {
        if self.development {
            Expiry::Never
        } else {
            Expiry::After(Duration::from_secs(self.cache_ttl_secs))
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate that the server can talk to upstream
    pub fn validate(&self) -> Result<()> {
        match self.github_token.as_deref() {
            None | Some("") => return Err(ConfigError::MissingToken.into()),
            Some(_) => {}
        }
        if self.request_timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("request_timeout_secs must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}
