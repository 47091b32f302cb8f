//! API handlers.

pub mod agent;
pub mod feeds;
pub mod lifestyle;
pub mod shopping;

pub use agent::*;
pub use feeds::*;
pub use lifestyle::*;
pub use shopping::*;

use std::sync::Arc;

use crate::config::Config;
use crate::router::QueryRouter;
use crate::tools::Toolbox;
use crate::Result;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provider tools.
    pub tools: Arc<Toolbox>,
    /// Keyword router over the same tools.
    pub router: QueryRouter,
}

impl AppState {
    /// Create a new application state around a tool set.
    pub fn new(tools: Arc<Toolbox>) -> Self {
        let router = QueryRouter::new(tools.clone());
        Self { tools, router }
    }

    /// Build the tool set from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(Toolbox::new(config)?)))
    }

    /// Configured default country.
    pub fn default_country(&self) -> &str {
        &self.tools.location().default_country
    }

    /// Configured default language.
    pub fn default_lang(&self) -> &str {
        &self.tools.location().default_lang
    }
}
