//! Field projection over raw upstream records
//!
//! A path such as `owner/login` walks nested objects key by key. The output
//! record uses the full path as its key and keeps the order of `paths`.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Resolve a `/`-delimited path against a record
pub fn extract<'a>(record: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = record;
    for segment in path.split('/') {
        current = current
            .as_object()
            .and_then(|obj| obj.get(segment))
            .ok_or_else(|| Error::FieldProjectionMissingPath {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
    }
    Ok(current)
}

/// Project every record onto `paths`, failing on the first missing path
pub fn project(records: &[Value], paths: &[&str]) -> Result<Vec<Map<String, Value>>> {
    records
        .iter()
        .map(|record| {
            paths
                .iter()
                .map(|path| Ok((path.to_string(), extract(record, path)?.clone())))
                .collect::<Result<Map<String, Value>>>()
        })
        .collect()
}
