//! Test helpers for the HTTP API tests.
//!
//! Upstream providers are either unreachable (a closed local port) or a
//! local axum stub bound to port 0, so no test touches the internet.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tokio::net::TcpListener;

use dailylog::config::{Config, EndpointsConfig};
use dailylog::web::router::{create_health_router, create_router};
use dailylog::web::AppState;

/// Closed port every provider points at in offline tests.
pub const OFFLINE_BASE: &str = "http://127.0.0.1:9";

/// Configuration with all providers at `base` and short timeouts.
pub fn config_at(base: &str) -> Config {
    let mut config = Config::default();
    config.endpoints = EndpointsConfig::all_at(base);
    config.fetch.timeout_secs = 2;
    config.fetch.short_timeout_secs = 1;
    config.fetch.connect_timeout_secs = 1;
    config
}

pub fn offline_config() -> Config {
    config_at(OFFLINE_BASE)
}

/// Build a test server for `config`.
pub fn test_server(config: &Config) -> TestServer {
    let state = Arc::new(AppState::from_config(config).expect("Failed to build app state"));
    let router = create_router(
        state,
        &config.server.cors_origins,
        config.server.max_concurrent_requests,
    )
    .merge(create_health_router());
    TestServer::new(router).expect("Failed to create test server")
}

/// Serve `router` as a fake upstream and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// RSS 2.0 document with one item per `(title, link)`.
pub fn rss(items: &[(&str, &str)]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link)| {
            format!(
                "<item><title>{}</title><link>{}</link>\
                 <pubDate>Mon, 02 Feb 2026 08:00:00 GMT</pubDate></item>",
                title, link
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Feed</title>{}</channel></rss>",
        body
    )
}
