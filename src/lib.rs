//! Daily Log - aggregation service for news, weather, trends and local
//! information.
//!
//! Provider data is fetched over HTTP through a shared TTL cache, feeds are
//! normalized into [`feed::FeedItem`] records, and free-text queries are
//! dispatched to tools by keyword in [`router`].

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod logging;
pub mod router;
pub mod tools;
pub mod web;

pub use config::Config;
pub use error::{DailyLogError, Result};
pub use router::{QueryResult, QueryRouter};
pub use tools::Toolbox;
