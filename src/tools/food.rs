//! Restaurant recommendations.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox, TOP_ITEMS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    pub rating: String,
    pub reviews: u64,
    pub price: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
}

impl Restaurant {
    fn listing(name: &str, cuisine: &str, rating: &str, reviews: u64, price: &str) -> Self {
        Self {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            rating: rating.to_string(),
            reviews,
            price: price.to_string(),
            address: String::new(),
            phone: String::new(),
            link: String::new(),
        }
    }
}

fn default_restaurants(cuisine: Option<&str>) -> Vec<Restaurant> {
    match cuisine {
        Some("italian") => vec![Restaurant::listing("Bella Italia", "Italian", "4.8/5", 324, "$$$")],
        Some("thai") => vec![
            Restaurant::listing("Bangkok Street", "Thai", "4.8/5", 301, "$$"),
            Restaurant::listing("Siam Garden", "Thai", "4.7/5", 245, "$$"),
        ],
        Some("chinese") => vec![
            Restaurant::listing("Golden Wok", "Chinese", "4.6/5", 278, "$$"),
            Restaurant::listing("Dragon Palace", "Chinese", "4.7/5", 342, "$$"),
        ],
        _ => vec![Restaurant::listing(
            "The Gourmet Kitchen",
            "Contemporary",
            "4.9/5",
            421,
            "$$$",
        )],
    }
}

impl Toolbox {
    /// Top-rated restaurants near the default location.
    pub async fn best_food(&self, cuisine: Option<&str>) -> Vec<Restaurant> {
        if self.providers.yelp_api_key.is_empty() {
            debug!("yelp key not configured, using default restaurants");
            return default_restaurants(cuisine);
        }

        match self.fetch_restaurants(cuisine).await {
            Ok(restaurants) if !restaurants.is_empty() => restaurants,
            Ok(_) => default_restaurants(cuisine),
            Err(e) => {
                warn!(error = %e, "restaurant search unavailable, using defaults");
                default_restaurants(cuisine)
            }
        }
    }

    async fn fetch_restaurants(&self, cuisine: Option<&str>) -> Result<Vec<Restaurant>> {
        let limit = TOP_ITEMS.to_string();
        let url = with_params(
            &format!("{}/businesses/search", self.endpoints.yelp),
            &[
                ("location", self.location.default_location.as_str()),
                ("categories", cuisine.unwrap_or("restaurants")),
                ("limit", limit.as_str()),
                ("sort_by", "rating"),
            ],
        )?;
        let options = FetchOptions::new().with_header(
            "Authorization",
            format!("Bearer {}", self.providers.yelp_api_key),
        );
        let data = self.fetch.json(&url, &options).await?;

        Ok(array_field(&data, "businesses")
            .iter()
            .map(|b| {
                let address = b
                    .get("location")
                    .map(|l| {
                        array_field(l, "display_address")
                            .iter()
                            .filter_map(|line| line.as_str())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_default();

                Restaurant {
                    name: str_field(b, "name").unwrap_or_default(),
                    cuisine: cuisine.unwrap_or("Restaurant").to_string(),
                    rating: format!("{}/5", str_field(b, "rating").unwrap_or_else(|| "0".into())),
                    reviews: b.get("review_count").and_then(|v| v.as_u64()).unwrap_or(0),
                    price: str_field(b, "price").unwrap_or_else(|| "$$".to_string()),
                    address,
                    phone: str_field(b, "phone").unwrap_or_default(),
                    link: str_field(b, "url").unwrap_or_default(),
                }
            })
            .collect())
    }
}
