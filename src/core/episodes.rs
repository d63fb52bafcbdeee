use tracing::{debug, error, info, trace};

use super::config::FeedConfig;
use super::feed::fetcher::{build_client, fetch_feed, FetchError};
use super::feed::parser::{parse_feed_bytes, value_keys, FeedParseError};
use super::feed::schema::{validate_feed, SchemaError};
use super::feed::types::{Episode, TimestampError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

impl LoadError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Parse(FeedParseError::EmptyPayload) => "missing_feed",
            Self::Parse(_) => "parse",
            Self::Schema(_) => "schema",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

/// Turns the configured podcast feed into episodes. Holds no episode state;
/// every call fetches the feed again.
#[derive(Debug, Clone)]
pub struct EpisodeLoader {
    client: reqwest::Client,
    feed_url: String,
}

impl EpisodeLoader {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config.timeout())?,
            feed_url: config.feed_url(),
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Episodes in feed order, or the reason the feed could not be used.
    pub async fn load(&self) -> Result<Vec<Episode>, LoadError> {
        info!(feed_url = %self.feed_url, "fetching podcast feed");
        let fetched = fetch_feed(&self.client, &self.feed_url).await?;
        debug!(
            bytes = fetched.body.len(),
            content_type = fetched.content_type.as_deref().unwrap_or("unknown"),
            "feed fetched"
        );

        let value = parse_feed_bytes(&fetched.body)?;
        debug!(keys = ?value_keys(&value), "feed converted");
        trace!(raw = %value, "raw feed value");

        let document = validate_feed(value)?;
        debug!(items = document.items.len(), "feed matches episode schema");

        let episodes = document
            .items
            .into_iter()
            .map(Episode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        info!(episodes = episodes.len(), "loaded episodes");
        Ok(episodes)
    }

    /// Fail-soft variant: any failure is logged and yields an empty list, so an
    /// empty result does not tell "no episodes" apart from "feed unavailable".
    /// Use [`EpisodeLoader::load`] when the difference matters.
    pub async fn get_all_episodes(&self) -> Vec<Episode> {
        match self.load().await {
            Ok(episodes) => episodes,
            Err(err) => {
                error!(
                    feed_url = %self.feed_url,
                    kind = err.kind(),
                    error = %err,
                    details = ?err,
                    "failed to load episodes"
                );
                Vec::new()
            }
        }
    }
}
