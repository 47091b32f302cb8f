//! HTTP API tests against offline providers.
//!
//! Every provider is unreachable here, so these tests pin down the
//! envelopes and the degraded answers each endpoint falls back to.

mod common;

use axum::http::StatusCode;
use common::{offline_config, test_server};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_index() {
    let server = test_server(&offline_config());

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");

    let index: Value = server.get("/").await.json();
    assert_eq!(index["endpoints"]["weather"], "/api/weather");
}

#[tokio::test]
async fn test_agent_info_lists_every_tool() {
    let server = test_server(&offline_config());

    let info: Value = server.get("/api/agent/info").await.json();
    assert_eq!(info["success"], true);
    assert_eq!(info["tools_count"], 18);

    let tools = info["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 18);
    assert_eq!(tools[0]["name"], "get_google_news");
    assert!(tools
        .iter()
        .all(|t| !t["description"].as_str().unwrap().is_empty()));
}

#[tokio::test]
async fn test_query_get_rejects_empty_query() {
    let server = test_server(&offline_config());

    let response = server.get("/api/query").add_query_param("q", "   ").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({"detail": "Query cannot be empty"}));

    let response = server.get("/api/query").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_post_rejects_empty_and_malformed() {
    let server = test_server(&offline_config());

    let response = server.post("/api/query").json(&json!({"query": ""})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/api/query").text("{not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_query_post_routes_weather() {
    let server = test_server(&offline_config());

    let response = server
        .post("/api/query")
        .json(&json!({"query": "What's the weather like?"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "What's the weather like?");
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Configure OPENWEATHER_API_KEY"));
}

#[tokio::test]
async fn test_query_default_route_offline() {
    let server = test_server(&offline_config());

    let body: Value = server
        .get("/api/query")
        .add_query_param("q", "hello there")
        .await
        .json();
    assert_eq!(body["response"], "Query: hello there\n\nNo results found.");
}

#[tokio::test]
async fn test_weather_falls_back_to_fixed_conditions() {
    let server = test_server(&offline_config());

    let body: Value = server.get("/api/weather").await.json();
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {
                "condition": "Partly Cloudy",
                "temp_c": "20",
                "temp_f": "68",
                "feels_like_c": "19",
                "feels_like_f": "66",
                "humidity": "65"
            }
        })
    );
}

#[tokio::test]
async fn test_news_and_github_labels() {
    let server = test_server(&offline_config());

    let news: Value = server.get("/api/news").await.json();
    assert_eq!(news["topic"], "general");
    assert_eq!(news["country"], "US");

    let news: Value = server
        .get("/api/news")
        .add_query_param("topic", "SPORTS")
        .add_query_param("country", "GB")
        .await
        .json();
    assert_eq!(news["topic"], "SPORTS");
    assert_eq!(news["country"], "GB");

    let github: Value = server.get("/api/github").await.json();
    assert_eq!(github["language"], "all");
    assert!(github["response"].is_string());
}

#[tokio::test]
async fn test_trends_resolves_through_news_rule() {
    let server = test_server(&offline_config());

    let body: Value = server.get("/api/trends").await.json();
    assert_eq!(body["success"], true);
    // "trending news" matches the news rule before the trending rule
    assert_eq!(body["response"], "No results found.");
}

#[tokio::test]
async fn test_feeds_offline_are_empty_lists() {
    let server = test_server(&offline_config());

    for path in [
        "/api/medium/trending",
        "/api/articles/medium",
        "/api/articles/devto",
        "/api/articles/hashnode",
        "/api/articles/hackernews",
        "/api/articles/reddit",
        "/api/news/google",
        "/api/news/country",
        "/api/news/international",
        "/api/news/local",
    ] {
        let body: Value = server.get(path).await.json();
        assert_eq!(body, json!({"success": true, "data": []}), "{}", path);
    }
}

#[tokio::test]
async fn test_tech_and_social_use_curated_list() {
    let server = test_server(&offline_config());

    let tech: Value = server.get("/api/tech/trending").await.json();
    assert_eq!(tech["data"].as_array().unwrap().len(), 5);

    let social: Value = server.get("/api/social/linkedin").await.json();
    assert_eq!(social["source"], "linkedin");
    assert_eq!(social["data"], tech["data"]);
}

#[tokio::test]
async fn test_lifestyle_defaults() {
    let server = test_server(&offline_config());

    let books: Value = server.get("/api/books/trending").await.json();
    assert_eq!(books["data"][0]["title"], "The Psychology of Money");
    assert_eq!(books["data"][0]["publishedDate"], "2020");

    let quote: Value = server.get("/api/quotes/daily").await.json();
    assert!(quote["data"]["text"].is_string());
    assert!(quote["data"]["author"].is_string());

    let fashion: Value = server.get("/api/fashion/trending").await.json();
    assert_eq!(fashion["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_food_routes() {
    let server = test_server(&offline_config());

    let thai: Value = server.get("/api/food/thai").await.json();
    assert_eq!(thai["cuisine"], "Thai");
    assert_eq!(thai["data"].as_array().unwrap().len(), 2);
    assert_eq!(thai["data"][0]["name"], "Bangkok Street");

    let all: Value = server.get("/api/food/restaurants").await.json();
    assert_eq!(all["cuisine"], "All");
    assert_eq!(all["data"][0]["name"], "The Gourmet Kitchen");

    let italian: Value = server
        .get("/api/food/restaurants")
        .add_query_param("cuisine", "Italian")
        .await
        .json();
    assert_eq!(italian["cuisine"], "Italian");
    assert_eq!(italian["data"][0]["name"], "Bella Italia");
}

#[tokio::test]
async fn test_events_nearby_parameters() {
    let server = test_server(&offline_config());

    let events: Value = server
        .get("/api/events/nearby")
        .add_query_param("location", "Austin, TX")
        .add_query_param("radius", "10")
        .add_query_param("category", "Music")
        .await
        .json();
    assert_eq!(events["data"].as_array().unwrap().len(), 3);
    assert_eq!(events["data"][0]["name"], "Music Meetup");
    assert_eq!(events["data"][0]["city"], "Austin, TX");
}

#[tokio::test]
async fn test_shopping_routes() {
    let server = test_server(&offline_config());

    let products: Value = server.get("/api/shopping/products").await.json();
    assert_eq!(products["store"], "All Stores");
    assert_eq!(products["category"], "All");
    assert_eq!(products["data"].as_array().unwrap().len(), 3);

    let books: Value = server.get("/api/shopping/books").await.json();
    assert_eq!(books["category"], "Books");
    assert_eq!(books["data"][0]["author"], "James Clear");

    let clothing: Value = server
        .get("/api/shopping/products")
        .add_query_param("store", "Target")
        .add_query_param("category", "clothing")
        .await
        .json();
    assert_eq!(clothing["store"], "Target");
    assert_eq!(clothing["data"][0]["store"], "Target");
}

#[tokio::test]
async fn test_gas_prices_and_cheapest() {
    let server = test_server(&offline_config());

    let prices: Value = server.get("/api/gas/prices").await.json();
    assert_eq!(prices["location"], "Current Location");
    assert_eq!(prices["data"].as_array().unwrap().len(), 3);

    let cheapest: Value = server
        .get("/api/gas/cheapest")
        .add_query_param("zipcode", "10001")
        .await
        .json();
    assert_eq!(cheapest["success"], true);
    assert_eq!(cheapest["cheapest_station"]["station"], "Chevron");
    assert_eq!(cheapest["cheapest_station"]["regular"], "$3.42");
    assert_eq!(cheapest["all_nearby"].as_array().unwrap().len(), 3);
    assert_eq!(cheapest["all_nearby"][0]["location"], "ZIP 10001");
    assert!(cheapest.get("error").is_none());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = test_server(&offline_config());
    server
        .get("/api/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
