//! Clock resource
//!
//! Has no upstream; useful for watching the cache expire.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};

use super::Resource;
use crate::cache::ctime;
use crate::client::GistApi;
use crate::error::Result;

pub struct Clock;

#[async_trait]
impl Resource for Clock {
    fn name(&self) -> &'static str {
        "time"
    }

    fn cache_key(&self, _arg: &str) -> String {
        "time".to_string()
    }

    fn fields(&self) -> &'static [&'static str] {
        &["time"]
    }

    async fn fetch_raw(&self, _api: &dyn GistApi, _arg: &str) -> Result<Value> {
        Ok(json!([{ "time": ctime(&Local::now()) }]))
    }
}
