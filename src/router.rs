//! Query router.
//!
//! Maps free-text queries onto tools with an ordered keyword table. Rules
//! are checked top to bottom and the first rule with a keyword contained in
//! the lowercased query wins, so `"weather news"` is a weather query.
//! Queries that match nothing get the query echoed back followed by the
//! general news headlines.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::tools::ToolName;
use crate::Result;

/// Maximum number of list entries shown by [`QueryResult::render`].
pub const MAX_RENDERED_ITEMS: usize = 10;

/// Output of a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Preformatted text, passed through unchanged.
    Text(String),
    /// A list of records.
    List(Vec<Value>),
    /// A single structured object.
    Object(Value),
}

impl QueryResult {
    /// Build a list result from serializable records.
    pub fn list<T: Serialize>(items: impl IntoIterator<Item = T>) -> Self {
        QueryResult::List(
            items
                .into_iter()
                .filter_map(|item| serde_json::to_value(item).ok())
                .collect(),
        )
    }

    /// Build an object result from a serializable value.
    pub fn object<T: Serialize>(value: &T) -> Self {
        QueryResult::Object(serde_json::to_value(value).unwrap_or_default())
    }

    /// Render the result as text.
    pub fn render(&self) -> String {
        match self {
            QueryResult::Text(text) => text.clone(),
            QueryResult::List(items) => render_list(items),
            QueryResult::Object(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

fn render_list(items: &[Value]) -> String {
    if items.is_empty() {
        return "No results found.".to_string();
    }

    items
        .iter()
        .take(MAX_RENDERED_ITEMS)
        .map(|item| match item {
            Value::Object(_) => {
                let title = first_field(item, &["title", "name"]).unwrap_or_else(|| "Item".into());
                match first_field(item, &["link", "url"]) {
                    Some(link) => format!("• {} ({})", title, link),
                    None => format!("• {}", title),
                }
            }
            Value::String(s) => format!("• {}", s),
            other => format!("• {}", other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// First non-empty scalar among `fields`.
fn first_field(item: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match item.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Something that can invoke tools by name with their default arguments.
pub trait ToolSet: Send + Sync {
    /// Invoke `tool`.
    fn invoke(&self, tool: ToolName) -> BoxFuture<'_, Result<QueryResult>>;
}

/// Where a query is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A single tool.
    Tool(ToolName),
    /// Tech, news and quote sections concatenated.
    Trending,
    /// Echo the query and show general news.
    Default,
}

/// A keyword rule.
#[derive(Debug)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub route: Route,
}

/// Dispatch table in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        keywords: &["weather", "temperature", "climate"],
        route: Route::Tool(ToolName::LocalWeather),
    },
    Rule {
        keywords: &["quote", "inspiration", "daily"],
        route: Route::Tool(ToolName::QuoteOfDay),
    },
    Rule {
        keywords: &["news", "google news", "headlines"],
        route: Route::Tool(ToolName::GoogleNews),
    },
    Rule {
        keywords: &["tech", "technology", "trending tech"],
        route: Route::Tool(ToolName::TechNews),
    },
    Rule {
        keywords: &["github", "repository", "repositories"],
        route: Route::Tool(ToolName::GithubTrending),
    },
    Rule {
        keywords: &["medium", "stories", "articles"],
        route: Route::Tool(ToolName::MediumTrending),
    },
    Rule {
        keywords: &["event", "events", "nearby"],
        route: Route::Tool(ToolName::EventsNearby),
    },
    Rule {
        keywords: &["trending", "trends"],
        route: Route::Trending,
    },
];

/// Resolve a query against [`RULES`].
pub fn resolve(query: &str) -> Route {
    let query = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| query.contains(k)))
        .map(|rule| rule.route)
        .unwrap_or(Route::Default)
}

/// Keyword router over a [`ToolSet`].
#[derive(Clone)]
pub struct QueryRouter {
    tools: Arc<dyn ToolSet>,
}

impl QueryRouter {
    pub fn new(tools: Arc<dyn ToolSet>) -> Self {
        Self { tools }
    }

    /// Route a query to a result.
    ///
    /// Tool failures are turned into an `"Error: ..."` text result.
    pub async fn route(&self, query: &str) -> QueryResult {
        let route = resolve(query);
        debug!(query = %query, route = ?route, "routing query");

        match route {
            Route::Tool(tool) => self.call(tool).await,
            Route::Trending => {
                // Sequential on purpose: sections appear in a fixed order
                let tech = self.call(ToolName::TechNews).await.render();
                let news = self.call(ToolName::GoogleNews).await.render();
                let quote = self.call(ToolName::QuoteOfDay).await.render();
                QueryResult::Text(format!(
                    "📊 Trending Information:\n\n🔥 Tech: {}\n\n📰 News: {}\n\n💭 Quote: {}",
                    tech, news, quote
                ))
            }
            Route::Default => {
                let news = self.call(ToolName::GoogleNews).await.render();
                QueryResult::Text(format!("Query: {}\n\n{}", query, news))
            }
        }
    }

    /// Route a query and render the result as text.
    pub async fn run(&self, query: &str) -> String {
        self.route(query).await.render()
    }

    /// News query, optionally for a topic and country.
    pub async fn news(&self, topic: Option<&str>, country: &str) -> String {
        let query = match topic {
            Some(topic) => format!("Get {} news from {}", topic, country),
            None => format!("Get top news from {}", country),
        };
        self.run(&query).await
    }

    /// Weather query.
    pub async fn weather(&self) -> String {
        self.run("What's the weather like?").await
    }

    /// Trends query.
    pub async fn trends(&self) -> String {
        self.run("Show me trending news, tech, and entertainment").await
    }

    /// GitHub query, optionally for a language.
    pub async fn github(&self, language: Option<&str>) -> String {
        match language {
            Some(language) => {
                self.run(&format!("Show me trending {} repositories on GitHub", language))
                    .await
            }
            None => self.run("Show me trending repositories on GitHub").await,
        }
    }

    async fn call(&self, tool: ToolName) -> QueryResult {
        match self.tools.invoke(tool).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "tool invocation failed");
                QueryResult::Text(format!("Error: {}", e))
            }
        }
    }
}
