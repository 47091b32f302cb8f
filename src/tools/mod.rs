//! Provider tools.
//!
//! Each tool wraps one upstream provider and normalizes its response into a
//! small record type. Tools never fail: upstream or parse errors degrade to
//! a stale cache entry (via [`FetchClient::fetch_cached`]) or to a fixed
//! default dataset, and a missing API key selects the default path directly.

mod events;
mod food;
mod lifestyle;
mod movies;
mod news;
mod shopping;
mod tech;
mod weather;

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::cache::TtlCache;
use crate::config::{Config, EndpointsConfig, LocationConfig, ProvidersConfig};
use crate::feed::FeedItem;
use crate::fetch::{FetchClient, Payload};
use crate::router::{QueryResult, ToolSet};
use crate::Result;

pub use events::{Event, EventQuery};
pub use food::Restaurant;
pub use lifestyle::{Book, Quote};
pub use shopping::{cheapest_station, GasStation, Product};
pub use tech::Repo;
pub use weather::{Units, WeatherSummary};

/// Number of feed entries returned by news tools.
pub const TOP_ITEMS: usize = 10;

/// Named tools known to the router and listed by the agent info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GoogleNews,
    LocalNews,
    MediumTrending,
    GithubTrending,
    TechNews,
    TrendingVideos,
    TrendingBooks,
    TrendingFashion,
    BestFood,
    QuoteOfDay,
    TrendingMovies,
    NowPlayingMovies,
    TrendingShows,
    SearchMovies,
    LocalWeather,
    CheapestGas,
    StoreProducts,
    EventsNearby,
}

impl ToolName {
    /// Every tool, in catalogue order.
    pub const ALL: [ToolName; 18] = [
        ToolName::GoogleNews,
        ToolName::LocalNews,
        ToolName::MediumTrending,
        ToolName::GithubTrending,
        ToolName::TechNews,
        ToolName::TrendingVideos,
        ToolName::TrendingBooks,
        ToolName::TrendingFashion,
        ToolName::BestFood,
        ToolName::QuoteOfDay,
        ToolName::TrendingMovies,
        ToolName::NowPlayingMovies,
        ToolName::TrendingShows,
        ToolName::SearchMovies,
        ToolName::LocalWeather,
        ToolName::CheapestGas,
        ToolName::StoreProducts,
        ToolName::EventsNearby,
    ];

    /// Stable tool name.
    pub fn name(&self) -> &'static str {
        match self {
            ToolName::GoogleNews => "get_google_news",
            ToolName::LocalNews => "get_local_news",
            ToolName::MediumTrending => "get_medium_trending",
            ToolName::GithubTrending => "get_github_trending",
            ToolName::TechNews => "get_tech_news",
            ToolName::TrendingVideos => "get_trending_videos",
            ToolName::TrendingBooks => "get_trending_books",
            ToolName::TrendingFashion => "get_trending_fashion",
            ToolName::BestFood => "get_best_food",
            ToolName::QuoteOfDay => "get_quote_of_day",
            ToolName::TrendingMovies => "get_trending_movies",
            ToolName::NowPlayingMovies => "get_now_playing_movies",
            ToolName::TrendingShows => "get_trending_shows",
            ToolName::SearchMovies => "search_movies",
            ToolName::LocalWeather => "get_local_weather",
            ToolName::CheapestGas => "get_cheapest_gas",
            ToolName::StoreProducts => "get_store_products",
            ToolName::EventsNearby => "get_events_nearby",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GoogleNews => "Fetch Google News RSS for trending news.",
            ToolName::LocalNews => "Fetch local news stories by location keyword search.",
            ToolName::MediumTrending => "Fetch trending stories from Medium.",
            ToolName::GithubTrending => "Fetch trending repositories from GitHub.",
            ToolName::TechNews => "Fetch trending technology news and stories.",
            ToolName::TrendingVideos => "Fetch trending videos from YouTube.",
            ToolName::TrendingBooks => "Fetch trending books from Open Library.",
            ToolName::TrendingFashion => "Fetch trending fashion items and styles.",
            ToolName::BestFood => "Fetch best food restaurants using Yelp.",
            ToolName::QuoteOfDay => "Get the quote of the day from Quotable.",
            ToolName::TrendingMovies => "Fetch trending movies from TMDB.",
            ToolName::NowPlayingMovies => "Get movies currently playing in theaters from TMDB.",
            ToolName::TrendingShows => "Fetch trending TV shows from TMDB.",
            ToolName::SearchMovies => "Search for movies by title or keyword using TMDB.",
            ToolName::LocalWeather => "Get local weather using OpenWeatherMap or wttr.in.",
            ToolName::CheapestGas => "Find cheapest gas prices nearby.",
            ToolName::StoreProducts => "Get popular products from stores.",
            ToolName::EventsNearby => "Fetch nearby events using Ticketmaster.",
        }
    }
}

/// Query used when [`ToolName::SearchMovies`] is invoked without arguments.
const DEFAULT_MOVIE_SEARCH: &str = "popular";

/// Second-tier cache key for the weather summary.
const WEATHER_SUMMARY_KEY: &str = "weather_data";

/// The production tool set.
pub struct Toolbox {
    fetch: FetchClient,
    providers: ProvidersConfig,
    endpoints: EndpointsConfig,
    location: LocationConfig,
    weather_cache: TtlCache<WeatherSummary>,
    weather_ttl: Duration,
}

impl Toolbox {
    /// Build the tool set from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let cache = Arc::new(TtlCache::<Payload>::new(
            config.cache.max_entries,
            Duration::from_secs(config.cache.default_ttl_secs),
        ));
        let fetch = FetchClient::new(&config.fetch, cache)?;
        let weather_ttl = Duration::from_secs(config.cache.weather_ttl_secs);

        Ok(Self {
            fetch,
            providers: config.providers.clone(),
            endpoints: config.endpoints.clone(),
            location: config.location.clone(),
            weather_cache: TtlCache::new(1, weather_ttl),
            weather_ttl,
        })
    }

    /// Default location settings.
    pub fn location(&self) -> &LocationConfig {
        &self.location
    }

    /// Fetch a feed and keep the first [`TOP_ITEMS`] entries.
    async fn feed_items(&self, url: &str) -> Result<Vec<FeedItem>> {
        let mut items = self.fetch.feed(url).await?;
        items.truncate(TOP_ITEMS);
        Ok(items)
    }

    /// Like [`Toolbox::feed_items`], with an empty list on failure.
    async fn feed_or_empty(&self, source: &str, url: &str) -> Vec<FeedItem> {
        match self.feed_items(url).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(source, url = %url, error = %e, "feed unavailable, returning no items");
                Vec::new()
            }
        }
    }
}

impl ToolSet for Toolbox {
    fn invoke(&self, tool: ToolName) -> BoxFuture<'_, Result<QueryResult>> {
        Box::pin(async move {
            let country = self.location.default_country.clone();
            let lang = self.location.default_lang.clone();

            let result = match tool {
                ToolName::GoogleNews => {
                    QueryResult::list(self.google_news(None, &country, &lang).await)
                }
                ToolName::LocalNews => {
                    QueryResult::list(self.local_news(None, &country, &lang).await)
                }
                ToolName::MediumTrending => QueryResult::list(self.medium_trending().await),
                ToolName::GithubTrending => QueryResult::list(self.github_trending(None).await),
                ToolName::TechNews => QueryResult::list(self.tech_news().await),
                ToolName::TrendingVideos => QueryResult::Text(self.trending_videos().await),
                ToolName::TrendingBooks => QueryResult::list(self.trending_books().await),
                ToolName::TrendingFashion => QueryResult::list(self.trending_fashion()),
                ToolName::BestFood => QueryResult::list(self.best_food(None).await),
                ToolName::QuoteOfDay => QueryResult::object(&self.quote_of_day().await),
                ToolName::TrendingMovies => QueryResult::Text(self.trending_movies().await),
                ToolName::NowPlayingMovies => QueryResult::Text(self.now_playing_movies().await),
                ToolName::TrendingShows => QueryResult::Text(self.trending_shows().await),
                ToolName::SearchMovies => {
                    QueryResult::Text(self.search_movies(DEFAULT_MOVIE_SEARCH).await)
                }
                ToolName::LocalWeather => {
                    QueryResult::Text(self.local_weather(Units::Celsius).await)
                }
                ToolName::CheapestGas => QueryResult::list(self.cheapest_gas(None)),
                ToolName::StoreProducts => QueryResult::list(self.store_products(None, None)),
                ToolName::EventsNearby => {
                    QueryResult::list(self.events_nearby(&EventQuery::default()).await)
                }
            };
            Ok(result)
        })
    }
}

/// String field of a JSON object, accepting numbers as well.
fn str_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array field of a JSON object; missing or mistyped yields an empty slice.
fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Build a URL with encoded query parameters.
fn with_params(base: &str, params: &[(&str, &str)]) -> Result<String> {
    url::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| crate::DailyLogError::Upstream(format!("invalid URL {}: {}", base, e)))
}
