pub mod layout;
pub mod pages;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::episodes::EpisodeLoader;
use super::AppServices;
use layout::{render_layout, Metadata, Page, SITE_METADATA};

#[derive(Clone)]
pub struct SiteState {
    loader: Arc<EpisodeLoader>,
    metadata: Metadata,
}

impl SiteState {
    pub fn new(loader: EpisodeLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            metadata: SITE_METADATA,
        }
    }

    fn render(&self, status: StatusCode, page: Page) -> Response {
        (status, Html(render_layout(&self.metadata, &page))).into_response()
    }
}

pub fn build_router(state: SiteState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/{episode}", get(episode))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<SiteState>) -> Response {
    match state.loader.load().await {
        Ok(episodes) => state.render(StatusCode::OK, pages::home_page(&episodes)),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "home page rendered without episodes");
            state.render(StatusCode::BAD_GATEWAY, pages::unavailable_page())
        }
    }
}

async fn episode(State(state): State<SiteState>, Path(episode): Path<String>) -> Response {
    let Ok(id) = episode.parse::<i64>() else {
        return state.render(StatusCode::NOT_FOUND, pages::not_found_page());
    };

    match state.loader.load().await {
        Ok(episodes) => match episodes.iter().find(|candidate| candidate.id == id) {
            Some(found) => state.render(StatusCode::OK, pages::episode_page(found)),
            None => state.render(StatusCode::NOT_FOUND, pages::not_found_page()),
        },
        Err(err) => {
            warn!(episode = id, kind = err.kind(), error = %err, "episode page unavailable");
            state.render(StatusCode::BAD_GATEWAY, pages::unavailable_page())
        }
    }
}

async fn health(State(state): State<SiteState>) -> impl IntoResponse {
    Json(AppServices::new(state.loader.feed_url()).health_report())
}

async fn not_found(State(state): State<SiteState>) -> Response {
    state.render(StatusCode::NOT_FOUND, pages::not_found_page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FeedConfig;
    use crate::core::feed_server::{build_router as build_feed_router, FeedServerState};

    async fn spawn(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    async fn spawn_site(api_url: &str) -> (String, tokio::task::JoinHandle<()>) {
        let loader = EpisodeLoader::new(&FeedConfig::new(api_url)).expect("loader should build");
        spawn(build_router(SiteState::new(loader))).await
    }

    #[tokio::test]
    async fn serves_home_and_episode_pages_from_feed() {
        let (feed_base, feed_task) =
            spawn(build_feed_router(FeedServerState::sample().expect("sample feed"))).await;
        let (site_base, site_task) = spawn_site(&feed_base).await;
        let client = reqwest::Client::new();

        let home = client.get(&site_base).send().await.expect("home responds");
        assert_eq!(home.status().as_u16(), 200);
        let html = home.text().await.expect("home body");
        assert!(html.contains(
            "<title>The Hollyweb Podcast - Chase and Luke discussing everything film, pop culture, and entertainment</title>"
        ));
        assert!(html.contains("1: Guam is sinking!"));
        assert!(html.contains("2: Oscar Nominations (ft. Justin Johnson)"));

        let page = client
            .get(format!("{site_base}/2"))
            .send()
            .await
            .expect("episode responds");
        assert_eq!(page.status().as_u16(), 200);
        let html = page.text().await.expect("episode body");
        assert!(html.contains(
            "<title>2: Oscar Nominations (ft. Justin Johnson) - The Hollyweb Podcast</title>"
        ));
        assert!(html.contains("<p>Oscar Nominations (ft. Justin Johnson)</p>"));

        let missing = client
            .get(format!("{site_base}/99"))
            .send()
            .await
            .expect("missing episode responds");
        assert_eq!(missing.status().as_u16(), 404);

        site_task.abort();
        feed_task.abort();
    }

    #[tokio::test]
    async fn feed_outage_is_reported_not_hidden() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        drop(listener);
        let (site_base, site_task) = spawn_site(&format!("http://{address}")).await;

        let response = reqwest::get(&site_base).await.expect("home responds");
        assert_eq!(response.status().as_u16(), 502);
        let html = response.text().await.expect("home body");
        assert!(html.contains("Episodes unavailable - The Hollyweb Podcast"));

        site_task.abort();
    }

    #[tokio::test]
    async fn health_reports_feed_url() {
        let (site_base, site_task) = spawn_site("http://localhost:1323").await;

        let report: std::collections::BTreeMap<String, String> =
            reqwest::get(format!("{site_base}/health"))
                .await
                .expect("health responds")
                .json()
                .await
                .expect("health is json");
        assert_eq!(report["status"], "ok");
        assert_eq!(report["feed_url"], "http://localhost:1323/api/feed");

        site_task.abort();
    }

    #[tokio::test]
    async fn unknown_paths_render_not_found() {
        let (site_base, site_task) = spawn_site("http://localhost:1323").await;

        let response = reqwest::get(format!("{site_base}/about/team"))
            .await
            .expect("fallback responds");
        assert_eq!(response.status().as_u16(), 404);
        let slug = reqwest::get(format!("{site_base}/pilot"))
            .await
            .expect("slug responds");
        assert_eq!(slug.status().as_u16(), 404);

        site_task.abort();
    }
}
