//! Development feed server publishing the sample episodes as RSS.

pub mod catalog;
pub mod writer;

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use sha2::{Digest, Sha256};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog::{sample_channel, Channel};
use writer::{write_rss, FeedWriteError};

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

#[derive(Clone)]
pub struct FeedServerState {
    body: Arc<str>,
    etag: Arc<str>,
}

impl FeedServerState {
    pub fn from_channel(channel: &Channel) -> Result<Self, FeedWriteError> {
        let body = write_rss(channel)?;
        let etag = feed_etag(&body);
        Ok(Self {
            body: body.into(),
            etag: etag.into(),
        })
    }

    pub fn sample() -> Result<Self, FeedWriteError> {
        Self::from_channel(&sample_channel())
    }
}

pub fn build_router(state: FeedServerState) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .route("/api/feed", get(feed))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn feed(State(state): State<FeedServerState>, headers: HeaderMap) -> Response {
    let matches_etag = headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|tag| tag.trim() == &*state.etag));
    if matches_etag {
        return (StatusCode::NOT_MODIFIED, [(ETAG, state.etag.to_string())]).into_response();
    }

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, RSS_CONTENT_TYPE.to_string()),
            (ETAG, state.etag.to_string()),
            (CACHE_CONTROL, "no-cache".to_string()),
        ],
        state.body.to_string(),
    )
        .into_response()
}

fn feed_etag(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    format!("\"{digest:x}\"")
}
