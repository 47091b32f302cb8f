//! HTTP API.
//!
//! Thin axum handlers over the provider tools and the query router. Every
//! endpoint answers with a JSON envelope; failures are `{"detail": ...}`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
