//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::*;
use super::middleware::create_cors_layer;

/// Create the main API router.
///
/// At most `max_concurrent` requests are handled at once across all routes;
/// further requests wait for a slot.
pub fn create_router(
    app_state: Arc<AppState>,
    cors_origins: &[String],
    max_concurrent: usize,
) -> Router {
    // Routed queries
    let agent_routes = Router::new()
        .route("/query", get(query_get).post(query_post))
        .route("/news", get(news))
        .route("/weather", get(weather))
        .route("/trends", get(trends))
        .route("/github", get(github))
        .route("/agent/info", get(agent_info));

    let article_routes = Router::new()
        .route("/medium", get(medium_articles))
        .route("/devto", get(devto_articles))
        .route("/hashnode", get(hashnode_articles))
        .route("/hackernews", get(hackernews_articles))
        .route("/reddit", get(reddit_articles));

    let news_routes = Router::new()
        .route("/google", get(google_news_feed))
        .route("/country", get(country_news_feed))
        .route("/international", get(international_news_feed))
        .route("/local", get(local_news_feed));

    let food_routes = Router::new()
        .route("/restaurants", get(food_restaurants))
        .route("/italian", get(food_italian))
        .route("/asian", get(food_asian))
        .route("/thai", get(food_thai))
        .route("/chinese", get(food_chinese))
        .route("/indian", get(food_indian))
        .route("/vegan", get(food_vegan));

    let shopping_routes = Router::new()
        .route("/products", get(shopping_products))
        .route("/electronics", get(shopping_electronics))
        .route("/books", get(shopping_books))
        .route("/clothing", get(shopping_clothing));

    let api_routes = Router::new()
        .merge(agent_routes)
        .nest("/articles", article_routes)
        .nest("/news", news_routes)
        .nest("/food", food_routes)
        .nest("/shopping", shopping_routes)
        .route("/medium/trending", get(medium_articles))
        .route("/books/trending", get(books_trending))
        .route("/github/trending", get(github_trending))
        .route("/tech/trending", get(tech_trending))
        .route("/quotes/daily", get(quotes_daily))
        .route("/fashion/trending", get(fashion_trending))
        .route("/gas/prices", get(gas_prices))
        .route("/gas/cheapest", get(gas_cheapest))
        .route("/events/nearby", get(events_nearby))
        .route("/social/twitter", get(social_twitter))
        .route("/social/linkedin", get(social_linkedin));

    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(GlobalConcurrencyLimitLayer::new(max_concurrent)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
