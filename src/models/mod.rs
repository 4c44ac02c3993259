//! Response models
//!
//! Structured shapes served to clients, built from validated upstream data.

pub mod forks;
pub mod history;

pub use forks::{ForkListing, ForkRecord};
pub use history::{HistoryMeta, ReconciledHistory, RevisionRecord};
