//! Response DTOs for the HTTP API.
//!
//! Envelopes carry `success: true`. Request failures are reported through
//! [`ApiError`](crate::web::error::ApiError), except for the cheapest gas
//! lookup which answers `success: false` when no station is known.

use serde::Serialize;

use crate::tools::GasStation;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Data labelled with the source it came from.
#[derive(Debug, Serialize)]
pub struct SourceResponse<T: Serialize> {
    pub success: bool,
    pub source: String,
    pub data: T,
}

impl<T: Serialize> SourceResponse<T> {
    pub fn new(source: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            source: source.into(),
            data,
        }
    }
}

/// Data for one category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse<T: Serialize> {
    pub success: bool,
    pub category: String,
    pub data: T,
}

impl<T: Serialize> CategoryResponse<T> {
    pub fn new(category: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            category: category.into(),
            data,
        }
    }
}

/// Restaurants for one cuisine.
#[derive(Debug, Serialize)]
pub struct CuisineResponse<T: Serialize> {
    pub success: bool,
    pub cuisine: String,
    pub data: T,
}

impl<T: Serialize> CuisineResponse<T> {
    pub fn new(cuisine: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            cuisine: cuisine.into(),
            data,
        }
    }
}

/// Data for one location.
#[derive(Debug, Serialize)]
pub struct LocationResponse<T: Serialize> {
    pub success: bool,
    pub location: String,
    pub data: T,
}

impl<T: Serialize> LocationResponse<T> {
    pub fn new(location: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            location: location.into(),
            data,
        }
    }
}

// ============================================================================
// Agent Responses
// ============================================================================

/// Routed query answer.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub query: String,
    pub response: String,
}

impl QueryResponse {
    pub fn new(query: impl Into<String>, response: String) -> Self {
        Self {
            success: true,
            query: query.into(),
            response,
        }
    }
}

/// Plain text answer.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub response: String,
}

impl TextResponse {
    pub fn new(response: String) -> Self {
        Self {
            success: true,
            response,
        }
    }
}

/// News answer with the filters that produced it.
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub success: bool,
    /// Requested topic, `"general"` when none was given.
    pub topic: String,
    pub country: String,
    pub response: String,
}

/// GitHub answer.
#[derive(Debug, Serialize)]
pub struct GithubResponse {
    pub success: bool,
    /// Requested language, `"all"` when none was given.
    pub language: String,
    pub response: String,
}

/// One entry of the tool catalogue.
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Tool catalogue.
#[derive(Debug, Serialize)]
pub struct AgentInfoResponse {
    pub success: bool,
    pub model: String,
    pub tools_count: usize,
    pub tools: Vec<ToolInfo>,
}

// ============================================================================
// Shopping Responses
// ============================================================================

/// Store products.
#[derive(Debug, Serialize)]
pub struct ProductsResponse<T: Serialize> {
    pub success: bool,
    pub store: String,
    pub category: String,
    pub data: T,
}

/// Cheapest nearby station and the stations it was chosen from.
#[derive(Debug, Serialize)]
pub struct CheapestGasResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheapest_station: Option<GasStation>,
    pub all_nearby: Vec<GasStation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
