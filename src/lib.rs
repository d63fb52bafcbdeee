pub mod core;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::config::{FeedConfig, FeedServerConfig, SiteConfig};
use crate::core::episodes::EpisodeLoader;
use crate::core::feed_server::{self, FeedServerState};
use crate::core::site::{self, SiteState};

pub use crate::core::feed::{Audio, Episode};

pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` wins as given; `info` when it is unset or unparseable.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub async fn serve_site(config: SiteConfig) -> anyhow::Result<()> {
    let loader = EpisodeLoader::new(&config.feed).context("failed to build feed client")?;
    info!(feed_url = %loader.feed_url(), "episodes will be loaded per request");

    let app = site::build_router(SiteState::new(loader));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("site listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn serve_feed(config: FeedServerConfig) -> anyhow::Result<()> {
    let state = FeedServerState::sample().context("failed to render sample feed")?;
    let app = feed_server::build_router(state);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("feed server listening on http://{}/api/feed", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Loads the feed once. Failures are logged and produce an empty list.
pub async fn list_episodes(config: FeedConfig) -> anyhow::Result<Vec<Episode>> {
    let loader = EpisodeLoader::new(&config).context("failed to build feed client")?;
    Ok(loader.get_all_episodes().await)
}
