//! Fork listing models

use serde::{Deserialize, Serialize};

use super::HistoryMeta;
use crate::client::models::Gist;

/// One submission: the parent gist or one of its forks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkRecord {
    pub login: String,
    pub avatar_url: String,
    pub id: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Gist> for ForkRecord {
    fn from(gist: &Gist) -> Self {
        Self {
            login: gist.owner.login.clone(),
            avatar_url: gist.owner.avatar_url.clone(),
            id: gist.id.clone(),
            description: gist.description.clone(),
            created_at: gist.created_at.clone(),
            updated_at: gist.updated_at.clone(),
        }
    }
}

/// A gist and all of its forks, parent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkListing {
    pub meta: HistoryMeta,
    pub records: Vec<ForkRecord>,
}

impl ForkListing {
    pub fn new(parent: &Gist, forks: &[Gist], blocks_run_root: &str) -> Self {
        let meta = HistoryMeta::new(
            &parent.id,
            &parent.owner.login,
            parent.description.clone(),
            blocks_run_root,
        );
        let records = std::iter::once(parent)
            .chain(forks.iter())
            .map(ForkRecord::from)
            .collect();

        Self { meta, records }
    }
}
