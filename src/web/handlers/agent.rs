//! Query and agent handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::tools::{ToolName, WeatherSummary};
use crate::web::dto::{
    AgentInfoResponse, ApiResponse, GithubResponse, LanguageParams, NewsParams, NewsResponse,
    QueryParams, QueryRequest, QueryResponse, TextResponse, ToolInfo,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Reported in place of a language model; routing is keyword based.
pub const ROUTER_MODEL: &str = "keyword-router";

const EMPTY_QUERY: &str = "Query cannot be empty";

/// GET / - Service index.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "My Daily Log API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Aggregates news, weather, trends and local information",
        "endpoints": {
            "query": "/api/query?q=<your_question>",
            "news": "/api/news?topic=<topic>",
            "weather": "/api/weather",
            "trends": "/api/trends",
            "github": "/api/github?language=<language>",
            "tools": "/api/agent/info",
        },
        "examples": [
            "/api/query?q=What's the latest news?",
            "/api/query?q=Show me trending tech news",
            "/api/weather",
            "/api/news?topic=TECHNOLOGY",
            "/api/trends",
        ],
    }))
}

async fn answer(state: &AppState, query: &str) -> Result<Json<QueryResponse>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request(EMPTY_QUERY));
    }
    let response = state.router.run(query).await;
    Ok(Json(QueryResponse::new(query, response)))
}

/// GET /api/query?q= - Route a free-text query.
pub async fn query_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    answer(&state, params.non_empty().unwrap_or_default()).await
}

/// POST /api/query - Route a free-text query from a JSON body.
pub async fn query_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    answer(&state, &request.query).await
}

/// GET /api/news - News through the router.
pub async fn news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Json<NewsResponse> {
    let country = params
        .country
        .unwrap_or_else(|| state.default_country().to_string());
    let response = state.router.news(params.topic.as_deref(), &country).await;

    Json(NewsResponse {
        success: true,
        topic: params.topic.unwrap_or_else(|| "general".to_string()),
        country,
        response,
    })
}

/// GET /api/weather - Current conditions summary.
pub async fn weather(State(state): State<Arc<AppState>>) -> Json<ApiResponse<WeatherSummary>> {
    Json(ApiResponse::new(state.tools.weather_summary().await))
}

/// GET /api/trends - Composite trending answer.
pub async fn trends(State(state): State<Arc<AppState>>) -> Json<TextResponse> {
    Json(TextResponse::new(state.router.trends().await))
}

/// GET /api/github - Trending repositories through the router.
pub async fn github(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageParams>,
) -> Json<GithubResponse> {
    let response = state.router.github(params.language.as_deref()).await;
    Json(GithubResponse {
        success: true,
        language: params.language.unwrap_or_else(|| "all".to_string()),
        response,
    })
}

/// GET /api/agent/info - Tool catalogue.
pub async fn agent_info() -> Json<AgentInfoResponse> {
    let tools: Vec<ToolInfo> = ToolName::ALL
        .iter()
        .map(|tool| ToolInfo {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
        })
        .collect();

    Json(AgentInfoResponse {
        success: true,
        model: ROUTER_MODEL.to_string(),
        tools_count: tools.len(),
        tools,
    })
}
