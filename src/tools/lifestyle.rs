//! Quotes, books and fashion.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::feed::FeedItem;
use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox, TOP_ITEMS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

const FALLBACK_QUOTES: [(&str, &str); 3] = [
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
    ),
    (
        "Believe you can and you're halfway there.",
        "Theodore Roosevelt",
    ),
];

fn fallback_quote() -> Quote {
    let (text, author) = FALLBACK_QUOTES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0]);
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}

fn default_books() -> Vec<Book> {
    vec![
        Book {
            title: "The Psychology of Money".to_string(),
            authors: vec!["Morgan Housel".to_string()],
            published_date: "2020".to_string(),
            link: "https://openlibrary.org/works/OL19953894W".to_string(),
            isbn: None,
        },
        Book {
            title: "Atomic Habits".to_string(),
            authors: vec!["James Clear".to_string()],
            published_date: "2018".to_string(),
            link: "https://openlibrary.org/works/OL19629461W".to_string(),
            isbn: None,
        },
    ]
}

const FASHION_TRENDS: [(&str, &str, &str); 3] = [
    (
        "Minimalist Fashion",
        "https://www.vogue.com/fashion/trends",
        "2026-02-02",
    ),
    (
        "Sustainable & Eco-Friendly Clothing",
        "https://www.vogue.com/fashion/sustainability",
        "2026-02-01",
    ),
    (
        "Retro 90s Revival",
        "https://www.vogue.com/fashion/90s-trends",
        "2026-02-01",
    ),
];

impl Toolbox {
    /// A random quote from Quotable, or a built-in one.
    pub async fn quote_of_day(&self) -> Quote {
        match self.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "quote service unavailable, using built-in quote");
                fallback_quote()
            }
        }
    }

    async fn fetch_quote(&self) -> Result<Quote> {
        let url = format!("{}/random", self.endpoints.quotable);
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;

        let text = str_field(&data, "content").unwrap_or_default();
        if text.is_empty() {
            return Err(crate::DailyLogError::Upstream(
                "quote response has no content".to_string(),
            ));
        }
        Ok(Quote {
            text,
            author: str_field(&data, "author").unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    /// Books from an Open Library title search.
    pub async fn trending_books(&self) -> Vec<Book> {
        match self.fetch_books("trending").await {
            Ok(books) if !books.is_empty() => books,
            Ok(_) => default_books(),
            Err(e) => {
                warn!(error = %e, "book search unavailable, using defaults");
                default_books()
            }
        }
    }

    async fn fetch_books(&self, query: &str) -> Result<Vec<Book>> {
        let limit = TOP_ITEMS.to_string();
        let url = with_params(
            &format!("{}/search.json", self.endpoints.open_library),
            &[("title", query), ("limit", limit.as_str()), ("sort", "-key")],
        )?;
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;

        Ok(array_field(&data, "docs")
            .iter()
            .take(TOP_ITEMS)
            .map(|doc| {
                let authors: Vec<String> = array_field(doc, "author_name")
                    .iter()
                    .filter_map(|a| a.as_str().map(String::from))
                    .collect();
                let link = str_field(doc, "key")
                    .filter(|k| !k.is_empty())
                    .map(|k| format!("https://openlibrary.org{}", k))
                    .unwrap_or_default();

                Book {
                    title: str_field(doc, "title").unwrap_or_else(|| "Unknown".to_string()),
                    authors: if authors.is_empty() {
                        vec!["Unknown".to_string()]
                    } else {
                        authors
                    },
                    published_date: str_field(doc, "first_publish_year")
                        .unwrap_or_else(|| "N/A".to_string()),
                    link,
                    isbn: array_field(doc, "isbn")
                        .first()
                        .and_then(|i| i.as_str().map(String::from)),
                }
            })
            .collect())
    }

    /// Current fashion trends.
    pub fn trending_fashion(&self) -> Vec<FeedItem> {
        FASHION_TRENDS
            .iter()
            .map(|(title, link, date)| FeedItem {
                title: title.to_string(),
                link: link.to_string(),
                published_date: date.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_quote_of_day_maps_content() {
        let app = Router::new().route(
            "/quotable/random",
            get(|| async { Json(json!({"content": "Keep going.", "author": "Anon"})) }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |_| {});

        let quote = toolbox.quote_of_day().await;
        assert_eq!(quote.text, "Keep going.");
        assert_eq!(quote.author, "Anon");
    }

    #[tokio::test]
    async fn test_quote_of_day_offline_uses_fallback() {
        let quote = offline_toolbox().quote_of_day().await;
        assert!(FALLBACK_QUOTES
            .iter()
            .any(|(text, author)| quote.text == *text && quote.author == *author));
    }

    #[tokio::test]
    async fn test_trending_books_maps_docs() {
        let app = Router::new().route(
            "/openlibrary/search.json",
            get(|| async {
                Json(json!({"docs": [{
                    "title": "Dune",
                    "author_name": ["Frank Herbert"],
                    "first_publish_year": 1965,
                    "key": "/works/OL893415W",
                    "isbn": ["9780441013593"]
                }]}))
            }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |_| {});

        let books = toolbox.trending_books().await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].published_date, "1965");
        assert_eq!(books[0].link, "https://openlibrary.org/works/OL893415W");
        assert_eq!(books[0].isbn.as_deref(), Some("9780441013593"));
    }

    #[tokio::test]
    async fn test_trending_books_empty_result_uses_defaults() {
        let app = Router::new().route(
            "/openlibrary/search.json",
            get(|| async { Json(json!({"docs": []})) }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |_| {});

        assert_eq!(toolbox.trending_books().await, default_books());
    }

    #[tokio::test]
    async fn test_trending_books_offline_uses_defaults() {
        assert_eq!(offline_toolbox().trending_books().await, default_books());
    }

    #[test]
    fn test_book_serializes_published_date() {
        let json = serde_json::to_value(&default_books()[0]).unwrap();
        assert_eq!(json["publishedDate"], "2020");
        assert!(json.get("isbn").is_none());
    }

    #[tokio::test]
    async fn test_trending_fashion() {
        let items = offline_toolbox().trending_fashion();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Minimalist Fashion");
    }
}
