//! Store products and gas prices.
//!
//! Neither provider has a public API, so both tools serve curated data.

use serde::{Deserialize, Serialize};

use super::Toolbox;

/// Price assumed for a station whose regular price cannot be read.
const UNKNOWN_PRICE: f64 = 9.99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasStation {
    pub station: String,
    pub location: String,
    pub regular: String,
    pub midgrade: String,
    pub premium: String,
    pub diesel: String,
    pub rating: String,
    pub distance: String,
}

impl GasStation {
    /// Regular price as a number, `$` stripped.
    pub fn regular_price(&self) -> f64 {
        self.regular
            .trim()
            .trim_matches('$')
            .parse()
            .unwrap_or(UNKNOWN_PRICE)
    }
}

/// The station with the lowest regular price; the first one wins ties.
pub fn cheapest_station(stations: &[GasStation]) -> Option<&GasStation> {
    stations
        .iter()
        .min_by(|a, b| a.regular_price().total_cmp(&b.regular_price()))
}

/// (title, author, default store, original price, price, discount, rating)
type Listing = (
    &'static str,
    Option<&'static str>,
    &'static str,
    Option<&'static str>,
    &'static str,
    Option<&'static str>,
    &'static str,
);

const ELECTRONICS: &[Listing] = &[
    ("Wireless Earbuds Pro", None, "Amazon", Some("$99.99"), "$79.99", Some("20%"), "4.8/5"),
    ("Smart Watch Series 8", None, "Best Buy", Some("$349.99"), "$299.99", Some("14%"), "4.7/5"),
    ("Portable SSD 1TB", None, "Walmart", Some("$129.99"), "$89.99", Some("31%"), "4.6/5"),
];

const BOOKS: &[Listing] = &[
    ("Atomic Habits", Some("James Clear"), "Amazon", Some("$27.99"), "$15.99", Some("43%"), "4.9/5"),
    (
        "The Midnight Library",
        Some("Matt Haig"),
        "Barnes & Noble",
        Some("$28.99"),
        "$17.99",
        Some("38%"),
        "4.7/5",
    ),
];

const CLOTHING: &[Listing] = &[
    ("Cotton T-Shirt Bundle", None, "Target", Some("$44.99"), "$24.99", Some("44%"), "4.6/5"),
    ("Denim Jeans Classic Fit", None, "Gap", Some("$89.99"), "$59.99", Some("33%"), "4.5/5"),
];

const POPULAR: &[Listing] = &[
    ("Popular Item 1", None, "Amazon", None, "$29.99", None, "4.5/5"),
    ("Best Seller 2", None, "Walmart", None, "$39.99", None, "4.6/5"),
];

/// (station, regular, midgrade, premium, diesel, rating, distance)
const STATIONS: [[&str; 7]; 3] = [
    ["Shell Gas Station", "$3.45", "$3.65", "$3.85", "$3.55", "4.3/5", "0.5 miles"],
    ["Chevron", "$3.42", "$3.62", "$3.82", "$3.52", "4.5/5", "0.8 miles"],
    ["BP Gas", "$3.48", "$3.68", "$3.88", "$3.58", "4.2/5", "1.2 miles"],
];

impl Toolbox {
    /// Popular products, optionally for one store and category.
    ///
    /// Electronics are the default category; unknown categories get a
    /// generic best-seller list.
    pub fn store_products(&self, store: Option<&str>, category: Option<&str>) -> Vec<Product> {
        let listings = match category.map(str::to_lowercase).as_deref() {
            None | Some("electronics") => ELECTRONICS,
            Some("books") => BOOKS,
            Some("clothing") => CLOTHING,
            Some(_) => POPULAR,
        };

        listings
            .iter()
            .map(
                |&(title, author, default_store, original_price, price, discount, rating)| {
                    Product {
                        title: title.to_string(),
                        author: author.map(String::from),
                        store: store.unwrap_or(default_store).to_string(),
                        original_price: original_price.map(String::from),
                        price: price.to_string(),
                        discount: discount.map(String::from),
                        rating: rating.to_string(),
                    }
                },
            )
            .collect()
    }

    /// Nearby gas stations with their prices.
    pub fn cheapest_gas(&self, zipcode: Option<&str>) -> Vec<GasStation> {
        let location = match zipcode {
            Some(zip) => format!("ZIP {}", zip),
            None => self.location.default_location.clone(),
        };

        STATIONS
            .iter()
            .map(
                |[station, regular, midgrade, premium, diesel, rating, distance]| GasStation {
                    station: station.to_string(),
                    location: location.clone(),
                    regular: regular.to_string(),
                    midgrade: midgrade.to_string(),
                    premium: premium.to_string(),
                    diesel: diesel.to_string(),
                    rating: rating.to_string(),
                    distance: distance.to_string(),
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn station(name: &str, regular: &str) -> GasStation {
        GasStation {
            station: name.to_string(),
            location: "here".to_string(),
            regular: regular.to_string(),
            midgrade: String::new(),
            premium: String::new(),
            diesel: String::new(),
            rating: String::new(),
            distance: String::new(),
        }
    }

    #[test]
    fn test_regular_price_parsing() {
        assert_eq!(station("a", "$3.45").regular_price(), 3.45);
        assert_eq!(station("a", " 2.10 ").regular_price(), 2.10);
        assert_eq!(station("a", "call").regular_price(), 9.99);
    }

    #[test]
    fn test_cheapest_station() {
        let stations = vec![
            station("a", "$3.45"),
            station("b", "$3.42"),
            station("c", "$3.48"),
        ];
        assert_eq!(cheapest_station(&stations).unwrap().station, "b");
    }

    #[test]
    fn test_cheapest_station_unparsable_counts_high() {
        let stations = vec![station("unknown", "n/a"), station("priced", "$9.50")];
        assert_eq!(cheapest_station(&stations).unwrap().station, "priced");
    }

    #[test]
    fn test_cheapest_station_tie_keeps_first() {
        let stations = vec![station("first", "$3.00"), station("second", "$3.00")];
        assert_eq!(cheapest_station(&stations).unwrap().station, "first");
    }

    #[test]
    fn test_cheapest_station_empty() {
        assert!(cheapest_station(&[]).is_none());
    }

    #[test]
    fn test_cheapest_gas_location() {
        let toolbox = offline_toolbox();

        let stations = toolbox.cheapest_gas(Some("10001"));
        assert_eq!(stations.len(), 3);
        assert!(stations.iter().all(|s| s.location == "ZIP 10001"));
        assert_eq!(cheapest_station(&stations).unwrap().station, "Chevron");

        let stations = toolbox.cheapest_gas(None);
        assert_eq!(stations[0].location, "New York, NY");
    }

    #[test]
    fn test_store_products_categories() {
        let toolbox = offline_toolbox();

        let electronics = toolbox.store_products(None, None);
        assert_eq!(electronics.len(), 3);
        assert_eq!(electronics[1].store, "Best Buy");

        let books = toolbox.store_products(Some("Target"), Some("books"));
        assert_eq!(books[0].author.as_deref(), Some("James Clear"));
        assert!(books.iter().all(|b| b.store == "Target"));

        let other = toolbox.store_products(None, Some("garden"));
        assert_eq!(other[0].title, "Popular Item 1");
        assert!(other[0].discount.is_none());
    }
}
