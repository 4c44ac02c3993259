//! classroll - class rosters and gist submission histories served from the
//! GitHub API, with an in-memory expiring cache.

pub mod assignments;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod models;
pub mod names;
pub mod projection;
pub mod resources;
pub mod server;
