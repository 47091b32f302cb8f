//! Movies and TV from TMDB.
//!
//! These tools answer with preformatted text. Without a TMDB key they
//! return a hint on how to configure one.

use serde_json::Value;
use tracing::warn;

use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox, TOP_ITEMS};

const TRENDING_MOVIES_HEADER: &str = "🎬 Trending Movies:\n\n";
const NOW_PLAYING_HEADER: &str = "🎭 Movies Now Playing:\n\n";
const TRENDING_SHOWS_HEADER: &str = "📺 Trending TV Shows:\n\n";

const NOW_PLAYING_LIMIT: usize = 8;
const SEARCH_LIMIT: usize = 5;

fn default_movies_text() -> String {
    format!(
        "{}Configure TMDB_API_KEY for real trending data\n• Visit https://www.themoviedb.org/ for API key",
        TRENDING_MOVIES_HEADER
    )
}

fn default_now_playing_text() -> String {
    format!(
        "{}Configure TMDB_API_KEY to see current theater releases",
        NOW_PLAYING_HEADER
    )
}

fn default_shows_text() -> String {
    format!(
        "{}Configure TMDB_API_KEY for real trending show data",
        TRENDING_SHOWS_HEADER
    )
}

/// Append one bullet per result; `None` when there were no results.
fn bullet_list(
    header: &str,
    results: &[Value],
    limit: usize,
    line: impl Fn(&Value) -> String,
) -> Option<String> {
    if results.is_empty() {
        return None;
    }
    let mut text = header.to_string();
    for result in results.iter().take(limit) {
        text.push_str(&format!("• {}\n", line(result)));
    }
    Some(text)
}

fn title_or_na(value: &Value, key: &str) -> String {
    str_field(value, key).unwrap_or_else(|| "N/A".to_string())
}

impl Toolbox {
    async fn tmdb_results(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Value>> {
        let mut all = vec![("api_key", self.providers.tmdb_api_key.as_str())];
        all.extend_from_slice(params);
        let url = with_params(&format!("{}/{}", self.endpoints.tmdb, path), &all)?;
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;
        Ok(array_field(&data, "results").to_vec())
    }

    fn has_tmdb_key(&self) -> bool {
        !self.providers.tmdb_api_key.is_empty()
    }

    pub async fn trending_movies(&self) -> String {
        if !self.has_tmdb_key() {
            return default_movies_text();
        }
        match self
            .tmdb_results("trending/movie/week", &[("language", "en-US")])
            .await
        {
            Ok(results) => bullet_list(TRENDING_MOVIES_HEADER, &results, TOP_ITEMS, |m| {
                format!("{} (⭐ {}/10)", title_or_na(m, "title"), title_or_na(m, "vote_average"))
            })
            .unwrap_or_else(default_movies_text),
            Err(e) => {
                warn!(error = %e, "trending movies unavailable");
                default_movies_text()
            }
        }
    }

    pub async fn now_playing_movies(&self) -> String {
        if !self.has_tmdb_key() {
            return default_now_playing_text();
        }
        let region = self.location.default_country.clone();
        match self
            .tmdb_results("movie/now_playing", &[("region", region.as_str())])
            .await
        {
            Ok(results) => bullet_list(NOW_PLAYING_HEADER, &results, NOW_PLAYING_LIMIT, |m| {
                title_or_na(m, "title")
            })
            .unwrap_or_else(default_now_playing_text),
            Err(e) => {
                warn!(error = %e, "now playing movies unavailable");
                default_now_playing_text()
            }
        }
    }

    pub async fn trending_shows(&self) -> String {
        if !self.has_tmdb_key() {
            return default_shows_text();
        }
        match self
            .tmdb_results("trending/tv/week", &[("language", "en-US")])
            .await
        {
            Ok(results) => bullet_list(TRENDING_SHOWS_HEADER, &results, TOP_ITEMS, |s| {
                format!("{} (⭐ {}/10)", title_or_na(s, "name"), title_or_na(s, "vote_average"))
            })
            .unwrap_or_else(default_shows_text),
            Err(e) => {
                warn!(error = %e, "trending shows unavailable");
                default_shows_text()
            }
        }
    }

    /// Movie search by title or keyword.
    pub async fn search_movies(&self, query: &str) -> String {
        if !self.has_tmdb_key() {
            return format!(
                "Search results for '{}': Configure TMDB_API_KEY to enable real search",
                query
            );
        }
        let header = format!("🔍 Search results for '{}':\n\n", query);
        match self
            .tmdb_results("search/movie", &[("query", query), ("language", "en-US")])
            .await
        {
            Ok(results) => bullet_list(&header, &results, SEARCH_LIMIT, |m| {
                let year: String = title_or_na(m, "release_date").chars().take(4).collect();
                format!("{} ({})", title_or_na(m, "title"), year)
            })
            .unwrap_or_else(|| format!("No results found for '{}'", query)),
            Err(e) => {
                warn!(error = %e, query = %query, "movie search failed");
                format!("Error searching for '{}'", query)
            }
        }
    }
}
