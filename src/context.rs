//! Application context
//!
//! Owns everything a request handler needs: configuration, the upstream
//! client, the response cache, the name directory and the assignment store.
//! Built once at startup and shared behind an `Arc`.

use std::sync::Arc;

use crate::assignments::AssignmentStore;
use crate::cache::ResponseCache;
use crate::client::{GistApi, GitHubClient};
use crate::config::Config;
use crate::error::Result;
use crate::names::NameDirectory;

pub struct AppContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Upstream client
    pub api: Arc<dyn GistApi>,
    /// Response cache, expiry taken from the config
    pub cache: ResponseCache,
    /// Display names, loaded once
    pub names: NameDirectory,
    /// Assignment descriptors, loaded lazily
    pub assignments: AssignmentStore,
}

impl AppContext {
    /// Create a context with full initialization.
    ///
    /// This handles:
    /// - Validating the configuration (token present)
    /// - Creating the GitHub client with the configured timeout
    /// - Loading the name directory
    ///
    /// # Errors
    /// Returns error if the config is invalid or the name directory cannot
    /// be read.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api = Arc::new(GitHubClient::from_config(&config)?);
        let names = NameDirectory::load(&config.names_path)?;
        Ok(Self::with_parts(config, api, names))
    }

    /// Assemble a context from already-built parts
    pub fn with_parts(config: Config, api: Arc<dyn GistApi>, names: NameDirectory) -> Self {
        let cache = ResponseCache::new(config.cache_expiry());
        let assignments = AssignmentStore::new(config.assignments_dir.clone());
        log::info!(
            "Cache expiry: {:?}{}",
            config.cache_expiry(),
            if config.development { " (development)" } else { "" }
        );
        Self {
            config,
            api,
            cache,
            names,
            assignments,
        }
    }
}
