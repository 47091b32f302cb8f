//! Request DTOs for the HTTP API.

use serde::Deserialize;

/// Body of `POST /api/query`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    /// Free-text query.
    #[serde(default)]
    pub query: String,
}

/// Query string of `GET /api/query`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    #[serde(default, alias = "q")]
    pub query: Option<String>,
}

/// News filters.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub topic: Option<String>,
    pub country: Option<String>,
}

/// Country selection for national and international news.
#[derive(Debug, Default, Deserialize)]
pub struct CountryParams {
    pub country: Option<String>,
    pub lang: Option<String>,
}

/// Local news selection.
#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub location: Option<String>,
    pub country: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageParams {
    pub language: Option<String>,
}

/// dev.to tag filter.
#[derive(Debug, Default, Deserialize)]
pub struct TagParams {
    pub tag: Option<String>,
}

/// Store and category filter for products.
#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    pub store: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZipcodeParams {
    pub zipcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CuisineParams {
    pub cuisine: Option<String>,
}

impl QueryParams {
    /// Trimmed query, `None` when missing or blank.
    pub fn non_empty(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_missing_field_defaults() {
        let request: QueryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.query, "");

        let request: QueryRequest = serde_json::from_str(r#"{"query": "weather"}"#).unwrap();
        assert_eq!(request.query, "weather");
    }

    #[test]
    fn test_query_params_non_empty() {
        let params = QueryParams {
            query: Some("  ".to_string()),
        };
        assert_eq!(params.non_empty(), None);

        let params = QueryParams {
            query: Some(" news ".to_string()),
        };
        assert_eq!(params.non_empty(), Some("news"));

        assert_eq!(QueryParams::default().non_empty(), None);
    }
}
