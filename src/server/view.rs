//! Route suffix parsing

use crate::error::{Error, Result};

/// Which rendering of a resource a route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// `.raw.live.json`: raw upstream payload, cache bypassed
    RawLive,
    /// `.raw.json`: raw payload in the cache envelope
    Raw,
    /// `.live.json`: filtered records, cache bypassed
    Live,
    /// `.filtered.json`: filtered records from the cache
    Filtered,
    /// `.json`: the resource's default view, from the cache
    Default,
}

/// Longest suffixes first so `.raw.json` is not read as `.json`
const SUFFIXES: [(&str, View); 5] = [
    (".raw.live.json", View::RawLive),
    (".raw.json", View::Raw),
    (".live.json", View::Live),
    (".filtered.json", View::Filtered),
    (".json", View::Default),
];

/// Split `acme.raw.json` into (`acme`, `View::Raw`)
pub fn parse_target(file: &str) -> Result<(&str, View)> {
    SUFFIXES
        .iter()
        .find_map(|(suffix, view)| {
            file.strip_suffix(suffix)
                .filter(|id| !id.is_empty())
                .map(|id| (id, *view))
        })
        .ok_or_else(|| Error::NotFound(format!("route '{}'", file)))
}
