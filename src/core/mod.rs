pub mod config;
pub mod episodes;
pub mod feed;
pub mod feed_server;
pub mod site;

use std::collections::BTreeMap;

/// Snapshot of what the running site is wired to, served on `/health`.
#[derive(Debug, Clone)]
pub struct AppServices {
    feed_url: String,
}

impl AppServices {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }

    pub fn health_report(&self) -> BTreeMap<String, String> {
        let mut report = BTreeMap::new();
        report.insert("status".to_string(), "ok".to_string());
        report.insert("feed_url".to_string(), self.feed_url.clone());
        report.insert(
            "version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        report
    }
}
