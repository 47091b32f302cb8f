//! Configuration module for Daily Log.

use serde::Deserialize;
use std::path::Path;

use crate::{DailyLogError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum number of requests handled at the same time.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    /// CORS allowed origins (empty = any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_concurrent_requests() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
            cors_origins: vec![],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Outbound HTTP fetch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every upstream request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Default total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Timeout for latency-sensitive callers (weather summary).
    #[serde(default = "default_short_timeout")]
    pub short_timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum response body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

fn default_user_agent() -> String {
    "daily-log-api/2.0".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_short_timeout() -> u64 {
    2
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_body_bytes() -> u64 {
    5 * 1024 * 1024 // 5MB
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            short_timeout_secs: default_short_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_redirects: default_max_redirects(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Default entry TTL in seconds.
    #[serde(default = "default_cache_ttl")]
    pub default_ttl_secs: u64,
    /// Maximum number of entries before least-recently-used eviction.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
    /// TTL of the weather summary response cache in seconds.
    #[serde(default = "default_weather_ttl")]
    pub weather_ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_cache_max_entries() -> usize {
    1024
}

fn default_weather_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_cache_ttl(),
            max_entries: default_cache_max_entries(),
            weather_ttl_secs: default_weather_ttl(),
        }
    }
}

/// Default location used by location-aware tools.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    /// Default city/location query.
    #[serde(default = "default_location")]
    pub default_location: String,
    /// Default country code.
    #[serde(default = "default_country")]
    pub default_country: String,
    /// Default language code.
    #[serde(default = "default_lang")]
    pub default_lang: String,
}

fn default_location() -> String {
    "New York, NY".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            default_country: default_country(),
            default_lang: default_lang(),
        }
    }
}

/// Provider API keys. An empty key means the provider is not configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub tmdb_api_key: String,
    #[serde(default)]
    pub openweather_api_key: String,
    #[serde(default)]
    pub yelp_api_key: String,
    #[serde(default)]
    pub github_api_key: String,
    #[serde(default)]
    pub youtube_api_key: String,
    #[serde(default)]
    pub ticketmaster_api_key: String,
}

/// Upstream base URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_google_news")]
    pub google_news: String,
    #[serde(default = "default_medium")]
    pub medium: String,
    #[serde(default = "default_devto")]
    pub devto: String,
    #[serde(default = "default_hashnode")]
    pub hashnode: String,
    #[serde(default = "default_hackernews")]
    pub hackernews: String,
    #[serde(default = "default_reddit")]
    pub reddit: String,
    #[serde(default = "default_github")]
    pub github: String,
    #[serde(default = "default_youtube")]
    pub youtube: String,
    #[serde(default = "default_youtube_api")]
    pub youtube_api: String,
    #[serde(default = "default_wttr")]
    pub wttr: String,
    #[serde(default = "default_openweather")]
    pub openweather: String,
    #[serde(default = "default_quotable")]
    pub quotable: String,
    #[serde(default = "default_open_library")]
    pub open_library: String,
    #[serde(default = "default_yelp")]
    pub yelp: String,
    #[serde(default = "default_tmdb")]
    pub tmdb: String,
    #[serde(default = "default_ticketmaster")]
    pub ticketmaster: String,
}

fn default_google_news() -> String {
    "https://news.google.com/rss".to_string()
}

fn default_medium() -> String {
    "https://medium.com/feed".to_string()
}

fn default_devto() -> String {
    "https://dev.to/feed".to_string()
}

fn default_hashnode() -> String {
    "https://hashnode.com/feed".to_string()
}

fn default_hackernews() -> String {
    "https://hnrss.org/frontpage".to_string()
}

fn default_reddit() -> String {
    "https://www.reddit.com/r/programming/.rss".to_string()
}

fn default_github() -> String {
    "https://api.github.com".to_string()
}

fn default_youtube() -> String {
    "https://www.youtube.com/feed/trending".to_string()
}

fn default_youtube_api() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_wttr() -> String {
    "https://wttr.in".to_string()
}

fn default_openweather() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_quotable() -> String {
    "https://api.quotable.io".to_string()
}

fn default_open_library() -> String {
    "https://openlibrary.org".to_string()
}

fn default_yelp() -> String {
    "https://api.yelp.com/v3".to_string()
}

fn default_tmdb() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_ticketmaster() -> String {
    "https://app.ticketmaster.com/discovery/v2".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            google_news: default_google_news(),
            medium: default_medium(),
            devto: default_devto(),
            hashnode: default_hashnode(),
            hackernews: default_hackernews(),
            reddit: default_reddit(),
            github: default_github(),
            youtube: default_youtube(),
            youtube_api: default_youtube_api(),
            wttr: default_wttr(),
            openweather: default_openweather(),
            quotable: default_quotable(),
            open_library: default_open_library(),
            yelp: default_yelp(),
            tmdb: default_tmdb(),
            ticketmaster: default_ticketmaster(),
        }
    }
}

impl EndpointsConfig {
    /// Point every provider at a path under a single base URL.
    ///
    /// Used to run against a local stub server.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let at = |path: &str| format!("{base}/{path}");
        Self {
            google_news: at("google/rss"),
            medium: at("medium/feed"),
            devto: at("devto/feed"),
            hashnode: at("hashnode/feed"),
            hackernews: at("hackernews/frontpage"),
            reddit: at("reddit/.rss"),
            github: at("github"),
            youtube: at("youtube/trending"),
            youtube_api: at("youtube/api"),
            wttr: at("wttr"),
            openweather: at("openweather"),
            quotable: at("quotable"),
            open_library: at("openlibrary"),
            yelp: at("yelp"),
            tmdb: at("tmdb"),
            ticketmaster: at("ticketmaster"),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Outbound fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Default location.
    #[serde(default)]
    pub location: LocationConfig,
    /// Provider API keys.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Upstream base URLs.
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DailyLogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DailyLogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Empty values are ignored so an exported-but-blank key keeps the
    /// file value.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let keys: [(&str, &mut String); 6] = [
            ("TMDB_API_KEY", &mut self.providers.tmdb_api_key),
            ("OPENWEATHER_API_KEY", &mut self.providers.openweather_api_key),
            ("YELP_API_KEY", &mut self.providers.yelp_api_key),
            ("GITHUB_API_KEY", &mut self.providers.github_api_key),
            ("YOUTUBE_API_KEY", &mut self.providers.youtube_api_key),
            ("TICKETMASTER_API_KEY", &mut self.providers.ticketmaster_api_key),
        ];
        for (name, slot) in keys {
            if let Some(value) = get(name) {
                *slot = value;
            }
        }

        if let Some(location) = get("DEFAULT_LOCATION") {
            self.location.default_location = location;
        }
        if let Some(country) = get("DEFAULT_COUNTRY") {
            self.location.default_country = country;
        }
        if let Some(level) = get("DAILYLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.max_concurrent_requests == 0 {
            return Err(DailyLogError::Validation(
                "server.max_concurrent_requests must be greater than 0".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(DailyLogError::Validation(
                "cache.max_entries must be greater than 0".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 || self.fetch.short_timeout_secs == 0 {
            return Err(DailyLogError::Validation(
                "fetch timeouts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
