use std::net::SocketAddr;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_API_URL: &str = "https://hollyweb-podcast-server.fly.dev";
pub const FEED_PATH: &str = "/api/feed";
pub const ENV_FILE: &str = ".env.local";

/// Where the episode feed lives and how long a fetch may take.
#[derive(Debug, Clone, Args)]
pub struct FeedConfig {
    /// Base URL of the podcast API serving the RSS feed
    #[arg(long = "api-url", env = "HOLLYWEB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Feed request timeout in seconds
    #[arg(long = "timeout-secs", env = "HOLLYWEB_FEED_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,
}

impl FeedConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: 20,
        }
    }

    pub fn feed_url(&self) -> String {
        let base = self.api_url.trim().trim_end_matches('/');
        let base = if base.is_empty() { DEFAULT_API_URL } else { base };
        format!("{base}{FEED_PATH}")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[derive(Debug, Clone, Args)]
pub struct SiteConfig {
    #[command(flatten)]
    pub feed: FeedConfig,

    /// Address the website listens on
    #[arg(long, env = "HOLLYWEB_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
}

#[derive(Debug, Clone, Args)]
pub struct FeedServerConfig {
    /// Address the sample feed server listens on
    #[arg(long, env = "HOLLYWEB_FEED_BIND", default_value = "0.0.0.0:1323")]
    pub bind: SocketAddr,
}

/// Loads `.env.local` into the process environment. Variables that are
/// already set keep their values.
pub fn load_env_file() -> bool {
    dotenvy::from_filename(ENV_FILE).is_ok()
}
