//! News and article feeds.

use crate::feed::FeedItem;

use super::Toolbox;

/// Google News topics accepted by [`Toolbox::google_news`].
pub const NEWS_TOPICS: [&str; 8] = [
    "WORLD",
    "NATION",
    "BUSINESS",
    "TECHNOLOGY",
    "ENTERTAINMENT",
    "SPORTS",
    "SCIENCE",
    "HEALTH",
];

fn edition(country: &str, lang: &str) -> String {
    format!("hl={lang}&gl={country}&ceid={country}:{lang}")
}

impl Toolbox {
    fn topic_url(&self, topic: &str, country: &str, lang: &str) -> String {
        format!(
            "{}/topics/{}?{}",
            self.endpoints.google_news,
            topic,
            edition(country, lang)
        )
    }

    /// Top headlines, or a topic section when `topic` is a known topic.
    ///
    /// Unknown topics fall back to the top headlines.
    pub async fn google_news(
        &self,
        topic: Option<&str>,
        country: &str,
        lang: &str,
    ) -> Vec<FeedItem> {
        let topic = topic
            .map(str::to_uppercase)
            .filter(|t| NEWS_TOPICS.contains(&t.as_str()));

        let url = match topic {
            Some(topic) => self.topic_url(&topic, country, lang),
            None => format!(
                "{}?{}",
                self.endpoints.google_news,
                edition(country, lang)
            ),
        };
        self.feed_or_empty("google_news", &url).await
    }

    /// Local stories from a keyword search on `location`.
    pub async fn local_news(
        &self,
        location: Option<&str>,
        country: &str,
        lang: &str,
    ) -> Vec<FeedItem> {
        let location = location.unwrap_or(self.location.default_location.as_str());
        let url = format!(
            "{}/search?q={}&{}",
            self.endpoints.google_news,
            urlencoding::encode(location),
            edition(country, lang)
        );
        self.feed_or_empty("local_news", &url).await
    }

    /// National news for a country.
    pub async fn country_news(&self, country: &str, lang: &str) -> Vec<FeedItem> {
        let url = self.topic_url("NATION", country, lang);
        self.feed_or_empty("country_news", &url).await
    }

    /// World news.
    pub async fn international_news(&self, lang: &str, country: &str) -> Vec<FeedItem> {
        let url = self.topic_url("WORLD", country, lang);
        self.feed_or_empty("international_news", &url).await
    }

    pub async fn medium_trending(&self) -> Vec<FeedItem> {
        let url = format!("{}/tag/trending", self.endpoints.medium);
        self.feed_or_empty("medium", &url).await
    }

    /// Dev.to stories, optionally for a single tag.
    pub async fn devto_trending(&self, tag: Option<&str>) -> Vec<FeedItem> {
        let url = match tag {
            Some(tag) => format!("{}/tag/{}", self.endpoints.devto, urlencoding::encode(tag)),
            None => self.endpoints.devto.clone(),
        };
        self.feed_or_empty("devto", &url).await
    }

    pub async fn hashnode_trending(&self) -> Vec<FeedItem> {
        let url = self.endpoints.hashnode.clone();
        self.feed_or_empty("hashnode", &url).await
    }

    pub async fn hackernews_top(&self) -> Vec<FeedItem> {
        let url = self.endpoints.hackernews.clone();
        self.feed_or_empty("hackernews", &url).await
    }

    pub async fn reddit_programming(&self) -> Vec<FeedItem> {
        let url = self.endpoints.reddit.clone();
        self.feed_or_empty("reddit", &url).await
    }
}
