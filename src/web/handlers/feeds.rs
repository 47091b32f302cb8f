//! Article, news and tech feed handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::feed::FeedItem;
use crate::tools::Repo;
use crate::web::dto::{
    ApiResponse, CountryParams, LanguageParams, LocationParams, NewsParams, SourceResponse,
    TagParams,
};
use crate::web::handlers::AppState;

type FeedResponse = Json<ApiResponse<Vec<FeedItem>>>;

/// GET /api/medium/trending, /api/articles/medium
pub async fn medium_articles(State(state): State<Arc<AppState>>) -> FeedResponse {
    Json(ApiResponse::new(state.tools.medium_trending().await))
}

/// GET /api/articles/devto - Optionally filtered by `tag`.
pub async fn devto_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TagParams>,
) -> FeedResponse {
    Json(ApiResponse::new(
        state.tools.devto_trending(params.tag.as_deref()).await,
    ))
}

/// GET /api/articles/hashnode
pub async fn hashnode_articles(State(state): State<Arc<AppState>>) -> FeedResponse {
    Json(ApiResponse::new(state.tools.hashnode_trending().await))
}

/// GET /api/articles/hackernews
pub async fn hackernews_articles(State(state): State<Arc<AppState>>) -> FeedResponse {
    Json(ApiResponse::new(state.tools.hackernews_top().await))
}

/// GET /api/articles/reddit
pub async fn reddit_articles(State(state): State<Arc<AppState>>) -> FeedResponse {
    Json(ApiResponse::new(state.tools.reddit_programming().await))
}

/// GET /api/news/google - Headlines or one topic section.
pub async fn google_news_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> FeedResponse {
    let country = params
        .country
        .as_deref()
        .unwrap_or(state.default_country());
    let items = state
        .tools
        .google_news(params.topic.as_deref(), country, state.default_lang())
        .await;
    Json(ApiResponse::new(items))
}

/// GET /api/news/country
pub async fn country_news_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> FeedResponse {
    let country = params
        .country
        .as_deref()
        .unwrap_or(state.default_country());
    let lang = params.lang.as_deref().unwrap_or(state.default_lang());
    Json(ApiResponse::new(
        state.tools.country_news(country, lang).await,
    ))
}

/// GET /api/news/international
pub async fn international_news_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> FeedResponse {
    let country = params
        .country
        .as_deref()
        .unwrap_or(state.default_country());
    let lang = params.lang.as_deref().unwrap_or(state.default_lang());
    Json(ApiResponse::new(
        state.tools.international_news(lang, country).await,
    ))
}

/// GET /api/news/local - Stories about `location`, the default location otherwise.
pub async fn local_news_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> FeedResponse {
    let country = params
        .country
        .as_deref()
        .unwrap_or(state.default_country());
    let lang = params.lang.as_deref().unwrap_or(state.default_lang());
    let items = state
        .tools
        .local_news(params.location.as_deref(), country, lang)
        .await;
    Json(ApiResponse::new(items))
}

/// GET /api/tech/trending
pub async fn tech_trending(State(state): State<Arc<AppState>>) -> FeedResponse {
    Json(ApiResponse::new(state.tools.tech_news().await))
}

/// GET /api/github/trending - Repositories, optionally for one language.
pub async fn github_trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageParams>,
) -> Json<ApiResponse<Vec<Repo>>> {
    Json(ApiResponse::new(
        state.tools.github_trending(params.language.as_deref()).await,
    ))
}

async fn social(state: &AppState, source: &str) -> Json<SourceResponse<Vec<FeedItem>>> {
    Json(SourceResponse::new(source, state.tools.tech_news().await))
}

/// GET /api/social/twitter - Tech news stands in for the social feed.
pub async fn social_twitter(
    State(state): State<Arc<AppState>>,
) -> Json<SourceResponse<Vec<FeedItem>>> {
    social(&state, "twitter").await
}

/// GET /api/social/linkedin
pub async fn social_linkedin(
    State(state): State<Arc<AppState>>,
) -> Json<SourceResponse<Vec<FeedItem>>> {
    social(&state, "linkedin").await
}
