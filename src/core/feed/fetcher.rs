use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("hollyweb-podcast/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Single GET of the feed document. Non-2xx responses are errors; nothing is retried.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = response.bytes().await?.to_vec();

    Ok(FetchedFeed { body, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::Router;

    async fn feed_handler() -> Response {
        (
            [(CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            include_str!("../../../fixtures/feeds/hollyweb.rss.xml"),
        )
            .into_response()
    }

    async fn broken_handler() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "temporary failure").into_response()
    }

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route("/api/feed", get(feed_handler))
            .route("/broken", get(broken_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    #[tokio::test]
    async fn fetch_feed_returns_body_and_content_type() {
        let (base, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let fetched = fetch_feed(&client, &format!("{base}/api/feed"))
            .await
            .expect("fetch should succeed");
        assert!(fetched.body.starts_with(b"<?xml"));
        assert_eq!(
            fetched.content_type.as_deref(),
            Some("application/rss+xml; charset=utf-8")
        );

        server_task.abort();
    }

    #[tokio::test]
    async fn fetch_feed_reports_http_status_without_retrying() {
        let (base, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let error = fetch_feed(&client, &format!("{base}/broken"))
            .await
            .expect_err("500 should be an error");
        assert!(matches!(error, FetchError::HttpStatus(500)));

        server_task.abort();
    }
}
