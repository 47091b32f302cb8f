//! Tech news, GitHub trending and videos.

use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::feed::FeedItem;
use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox, TOP_ITEMS};

/// A trending repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub language: String,
    pub url: String,
}

const TECH_FALLBACK_LINK: &str =
    "https://news.google.com/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRGRqTVhZU0FtVnVHZ0pWVXlnQVAB";

const TECH_FALLBACK: [(&str, &str); 5] = [
    ("Latest AI Breakthroughs in 2026", "2026-02-02"),
    ("New Programming Languages Gaining Popularity", "2026-02-02"),
    ("Cloud Computing Trends for Enterprise", "2026-02-01"),
    ("Cybersecurity Best Practices in 2026", "2026-02-01"),
    ("Quantum Computing Makes New Advances", "2026-01-31"),
];

/// Text returned by [`Toolbox::trending_videos`].
pub const TRENDING_VIDEOS_TEXT: &str =
    "YouTube Trending Videos: Visit https://www.youtube.com/feed/trending for real-time trending videos";

fn default_tech_news() -> Vec<FeedItem> {
    TECH_FALLBACK
        .iter()
        .map(|(title, date)| FeedItem {
            title: title.to_string(),
            link: TECH_FALLBACK_LINK.to_string(),
            published_date: date.to_string(),
        })
        .collect()
}

impl Toolbox {
    /// Technology headlines; a curated list when the feed is unavailable.
    pub async fn tech_news(&self) -> Vec<FeedItem> {
        let url = format!(
            "{}/topics/TECHNOLOGY?hl=en&gl=US&ceid=US:en",
            self.endpoints.google_news
        );
        match self.feed_items(&url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "tech news unavailable, using curated list");
                default_tech_news()
            }
        }
    }

    /// Most-starred repositories created within the last year.
    pub async fn github_trending(&self, language: Option<&str>) -> Vec<Repo> {
        match self.fetch_github_trending(language).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(error = %e, "github trending unavailable");
                Vec::new()
            }
        }
    }

    async fn fetch_github_trending(&self, language: Option<&str>) -> Result<Vec<Repo>> {
        let since = (Utc::now() - ChronoDuration::days(365)).format("%Y-%m-%d");
        let mut query = format!("stars:>1000 created:>{}", since);
        if let Some(language) = language {
            query.push_str(&format!(" language:{}", language));
        }

        let url = with_params(
            &format!("{}/search/repositories", self.endpoints.github),
            &[("q", query.as_str()), ("sort", "stars"), ("order", "desc")],
        )?;

        let mut options = FetchOptions::new().with_header("Accept", "application/vnd.github+json");
        if !self.providers.github_api_key.is_empty() {
            options = options.with_header(
                "Authorization",
                format!("token {}", self.providers.github_api_key),
            );
        }

        let data = self.fetch.json(&url, &options).await?;
        Ok(array_field(&data, "items")
            .iter()
            .take(TOP_ITEMS)
            .map(|r| Repo {
                name: str_field(r, "full_name").unwrap_or_else(|| "Unknown".to_string()),
                description: str_field(r, "description").unwrap_or_default(),
                stars: r.get("stargazers_count").and_then(|v| v.as_u64()).unwrap_or(0),
                language: str_field(r, "language").unwrap_or_default(),
                url: str_field(r, "html_url").unwrap_or_default(),
            })
            .collect())
    }

    /// Most popular YouTube videos.
    ///
    /// Needs a YouTube key; without one (or when the API fails) this is a
    /// pointer to the public trending page after a best-effort fetch.
    pub async fn trending_videos(&self) -> String {
        if !self.providers.youtube_api_key.is_empty() {
            match self.fetch_popular_videos().await {
                Ok(videos) if !videos.is_empty() => {
                    let lines: Vec<String> = videos
                        .iter()
                        .map(|(title, id)| {
                            format!("• {} (https://www.youtube.com/watch?v={})", title, id)
                        })
                        .collect();
                    return format!("YouTube Trending Videos:\n{}", lines.join("\n"));
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "youtube data api unavailable"),
            }
        }

        let url = format!("{}?gl=US", self.endpoints.youtube);
        if let Err(e) = self.fetch.text(&url, &FetchOptions::new()).await {
            warn!(error = %e, "youtube trending unavailable");
        }
        TRENDING_VIDEOS_TEXT.to_string()
    }

    /// `(title, video id)` pairs from the most-popular chart.
    async fn fetch_popular_videos(&self) -> Result<Vec<(String, String)>> {
        let limit = TOP_ITEMS.to_string();
        let url = with_params(
            &format!("{}/videos", self.endpoints.youtube_api),
            &[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("regionCode", "US"),
                ("maxResults", limit.as_str()),
                ("key", self.providers.youtube_api_key.as_str()),
            ],
        )?;
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;

        Ok(array_field(&data, "items")
            .iter()
            .filter_map(|video| {
                let id = str_field(video, "id")?;
                let title = video
                    .get("snippet")
                    .and_then(|s| str_field(s, "title"))
                    .unwrap_or_else(|| "Untitled".to_string());
                Some((title, id))
            })
            .collect())
    }
}
