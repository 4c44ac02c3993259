//! GitHub API data models
//!
//! Only the fields classroll reads are typed; everything else stays in the
//! raw payloads that get cached and projected.

mod gist;
mod purview;

pub use gist::{Gist, GistOwner, HistoryEntry};
pub use purview::{PurviewCommit, PurviewManifest};
