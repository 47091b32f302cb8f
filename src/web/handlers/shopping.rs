//! Shopping and gas price handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::tools::{cheapest_station, GasStation, Product};
use crate::web::dto::{
    CategoryResponse, CheapestGasResponse, LocationResponse, ProductParams, ProductsResponse,
    ZipcodeParams,
};
use crate::web::handlers::AppState;

type CategoryProducts = Json<CategoryResponse<Vec<Product>>>;

/// GET /api/shopping/products - Products by store and category.
pub async fn shopping_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductParams>,
) -> Json<ProductsResponse<Vec<Product>>> {
    let data = state
        .tools
        .store_products(params.store.as_deref(), params.category.as_deref());

    Json(ProductsResponse {
        success: true,
        store: params.store.unwrap_or_else(|| "All Stores".to_string()),
        category: params.category.unwrap_or_else(|| "All".to_string()),
        data,
    })
}

fn category_products(state: &AppState, category: &str, label: &str) -> CategoryProducts {
    Json(CategoryResponse::new(
        label,
        state.tools.store_products(None, Some(category)),
    ))
}

pub async fn shopping_electronics(State(state): State<Arc<AppState>>) -> CategoryProducts {
    category_products(&state, "electronics", "Electronics")
}

pub async fn shopping_books(State(state): State<Arc<AppState>>) -> CategoryProducts {
    category_products(&state, "books", "Books")
}

pub async fn shopping_clothing(State(state): State<Arc<AppState>>) -> CategoryProducts {
    category_products(&state, "clothing", "Clothing")
}

/// GET /api/gas/prices - Nearby stations and their prices.
pub async fn gas_prices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ZipcodeParams>,
) -> Json<LocationResponse<Vec<GasStation>>> {
    let stations = state.tools.cheapest_gas(params.zipcode.as_deref());
    let location = params
        .zipcode
        .unwrap_or_else(|| "Current Location".to_string());
    Json(LocationResponse::new(location, stations))
}

/// GET /api/gas/cheapest - Station with the lowest regular price.
pub async fn gas_cheapest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ZipcodeParams>,
) -> Json<CheapestGasResponse> {
    let stations = state.tools.cheapest_gas(params.zipcode.as_deref());

    let response = match cheapest_station(&stations).cloned() {
        Some(cheapest) => CheapestGasResponse {
            success: true,
            cheapest_station: Some(cheapest),
            all_nearby: stations,
            error: None,
        },
        None => CheapestGasResponse {
            success: false,
            cheapest_station: None,
            all_nearby: Vec::new(),
            error: Some("No gas stations found".to_string()),
        },
    };
    Json(response)
}
