//! Assignment descriptors
//!
//! Each assignment is a `<id>.json` file in the assignments directory. A file
//! is read on first request and kept for the life of the process.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct AssignmentStore {
    dir: PathBuf,
    loaded: Mutex<HashMap<String, Arc<Value>>>,
}

impl AssignmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    fn loaded(&self) -> MutexGuard<'_, HashMap<String, Arc<Value>>> {
        self.loaded.lock().unwrap_or_else(|poisoned| {
            log::warn!("Assignment store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Ids map directly to file names, so anything that could leave the
    /// directory is rejected.
    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
            return Err(Error::NotFound(format!("assignment '{}'", id)));
        }
        Ok(())
    }

    /// Get an assignment descriptor, loading it on first use
    pub fn get(&self, id: &str) -> Result<Arc<Value>> {
        Self::validate_id(id)?;

        if let Some(found) = self.loaded().get(id) {
            return Ok(Arc::clone(found));
        }

        let path = self.dir.join(format!("{}.json", id));
        if !path.is_file() {
            return Err(Error::NotFound(format!("assignment '{}'", id)));
        }
        let contents = std::fs::read_to_string(&path)?;
        let descriptor = Arc::new(serde_json::from_str::<Value>(&contents)?);
        log::info!("Loaded assignment {} from {}", id, path.display());

        self.loaded().insert(id.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }
}
