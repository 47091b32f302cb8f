//! Books, quotes, fashion, food and events handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::feed::FeedItem;
use crate::tools::{Book, Event, EventQuery, Quote, Restaurant};
use crate::web::dto::{ApiResponse, CuisineParams, CuisineResponse};
use crate::web::handlers::AppState;

type RestaurantsResponse = Json<CuisineResponse<Vec<Restaurant>>>;

/// GET /api/books/trending
pub async fn books_trending(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<Book>>> {
    Json(ApiResponse::new(state.tools.trending_books().await))
}

/// GET /api/quotes/daily
pub async fn quotes_daily(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Quote>> {
    Json(ApiResponse::new(state.tools.quote_of_day().await))
}

/// GET /api/fashion/trending
pub async fn fashion_trending(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<FeedItem>>> {
    Json(ApiResponse::new(state.tools.trending_fashion()))
}

/// GET /api/food/restaurants - Top restaurants, optionally for one cuisine.
pub async fn food_restaurants(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CuisineParams>,
) -> RestaurantsResponse {
    let cuisine = params.cuisine.as_deref().map(str::to_lowercase);
    let restaurants = state.tools.best_food(cuisine.as_deref()).await;
    let label = params.cuisine.unwrap_or_else(|| "All".to_string());
    Json(CuisineResponse::new(label, restaurants))
}

async fn restaurants_for(state: &AppState, cuisine: &str, label: &str) -> RestaurantsResponse {
    let restaurants = state.tools.best_food(Some(cuisine)).await;
    Json(CuisineResponse::new(label, restaurants))
}

pub async fn food_italian(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "italian", "Italian").await
}

pub async fn food_asian(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "asian", "Asian").await
}

pub async fn food_thai(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "thai", "Thai").await
}

pub async fn food_chinese(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "chinese", "Chinese").await
}

pub async fn food_indian(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "indian", "Indian").await
}

pub async fn food_vegan(State(state): State<Arc<AppState>>) -> RestaurantsResponse {
    restaurants_for(&state, "vegan", "Vegan").await
}

/// GET /api/events/nearby - Events by location, radius and category.
pub async fn events_nearby(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventQuery>,
) -> Json<ApiResponse<Vec<Event>>> {
    Json(ApiResponse::new(state.tools.events_nearby(&query).await))
}
