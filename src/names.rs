//! Handle to display-name directory
//!
//! Loaded once at startup. Only members listed here appear on a roster.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ApiError, ConfigError, Result};

#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    names: HashMap<String, String>,
}

impl NameDirectory {
    /// Load a `{"login": "Display Name", ...}` JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path)?;
        let names: HashMap<String, String> = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", path.display(), e))
        })?;
        log::info!("Loaded {} display names from {}", names.len(), path.display());
        Ok(Self { names })
    }

    pub fn get(&self, login: &str) -> Option<&str> {
        self.names.get(login).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Attach display names to members, dropping members without one
    pub fn join_members(&self, members: Value) -> Result<Value> {
        let Value::Array(members) = members else {
            return Err(ApiError::Malformed("member list is not an array".to_string()).into());
        };

        let joined = members
            .into_iter()
            .filter_map(|mut member| {
                let login = member.get("login").and_then(Value::as_str)?.to_string();
                let Some(name) = self.get(&login) else {
                    log::debug!("Dropping member {} without a display name", login);
                    return None;
                };
                let obj = member.as_object_mut()?;
                obj.insert("name".to_string(), Value::String(name.to_string()));
                Some(member)
            })
            .collect();

        Ok(Value::Array(joined))
    }
}

impl FromIterator<(String, String)> for NameDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
