//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

pub mod serve;
pub mod status;

/// classroll - class roster and gist history server
#[derive(Parser, Debug)]
#[command(name = "classroll")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "CLASSROLL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CLASSROLL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// GitHub access token
    #[arg(
        long,
        global = true,
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Custom GitHub API base URL for development/testing
    #[arg(long, global = true, env = "CLASSROLL_API_BASE", hide_env = true)]
    pub api_base: Option<String>,

    /// Development mode: cached responses never expire
    #[arg(long, global = true, env = "CLASSROLL_DEVELOPMENT", hide_env = true)]
    pub development: bool,

    /// Handle -> display name JSON file
    #[arg(long, global = true)]
    pub names: Option<String>,

    /// Address to listen on
    #[arg(long, global = true)]
    pub bind: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Show the resolved configuration
    Status,

    /// Display version information
    Version,
}

impl Cli {
    /// Load the config file and apply flag/env overrides.
    ///
    /// Precedence: CLI flag > environment variable > config file > default.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_at(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref token) = self.token {
            config.github_token = Some(token.clone());
        }
        if let Some(ref api_base) = self.api_base {
            config.api_base = api_base.clone();
        }
        if self.development {
            config.development = true;
        }
        if let Some(ref names) = self.names {
            config.names_path = names.into();
        }
        if let Some(ref bind) = self.bind {
            config.bind = bind.clone();
        }
    }
}
