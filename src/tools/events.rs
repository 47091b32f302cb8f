//! Nearby events.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox};

/// Maximum number of events returned from Ticketmaster.
pub const MAX_EVENTS: usize = 15;

/// Event search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventQuery {
    pub location: Option<String>,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub category: Option<String>,
}

fn default_radius() -> u32 {
    25
}

fn default_unit() -> String {
    "miles".to_string()
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            location: None,
            radius: default_radius(),
            unit: default_unit(),
            category: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub url: String,
    pub category: String,
}

fn path_str(value: &Value, path: &[&str]) -> String {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    match current {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

impl Toolbox {
    fn default_events(&self, query: &EventQuery) -> Vec<Event> {
        let city = query
            .location
            .clone()
            .unwrap_or_else(|| self.location.default_location.clone());
        let label = query.category.as_deref().unwrap_or("Community");

        [
            ("Meetup", "2026-02-07", "18:30", "Downtown Hall", "https://www.meetup.com/"),
            (
                "Networking Night",
                "2026-02-09",
                "19:00",
                "City Conference Center",
                "https://www.eventbrite.com/",
            ),
            (
                "Live Session",
                "2026-02-10",
                "20:00",
                "Main Theater",
                "https://www.ticketmaster.com/",
            ),
        ]
        .into_iter()
        .map(|(kind, date, time, venue, url)| Event {
            name: format!("{} {}", label, kind),
            date: date.to_string(),
            time: time.to_string(),
            venue: venue.to_string(),
            city: city.clone(),
            country: "US".to_string(),
            url: url.to_string(),
            category: label.to_string(),
        })
        .collect()
    }

    /// Events near a location, from Ticketmaster when a key is configured.
    pub async fn events_nearby(&self, query: &EventQuery) -> Vec<Event> {
        if self.providers.ticketmaster_api_key.is_empty() {
            debug!("ticketmaster key not configured, using default events");
            return self.default_events(query);
        }

        match self.fetch_events(query).await {
            Ok(events) if !events.is_empty() => events,
            Ok(_) => self.default_events(query),
            Err(e) => {
                warn!(error = %e, "event search unavailable, using default events");
                self.default_events(query)
            }
        }
    }

    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let radius = query.radius.to_string();
        let mut params = vec![
            ("apikey", self.providers.ticketmaster_api_key.as_str()),
            ("keyword", query.category.as_deref().unwrap_or("")),
            ("radius", radius.as_str()),
            ("unit", query.unit.as_str()),
            ("locale", "*"),
        ];
        if let Some(location) = &query.location {
            params.push(("city", location.as_str()));
        }

        let url = with_params(&format!("{}/events.json", self.endpoints.ticketmaster), &params)?;
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;

        let category = query.category.as_deref().unwrap_or("Event");
        let events = data
            .get("_embedded")
            .map(|e| array_field(e, "events"))
            .unwrap_or(&[]);

        Ok(events
            .iter()
            .take(MAX_EVENTS)
            .map(|item| {
                let venue = item
                    .get("_embedded")
                    .map(|e| array_field(e, "venues"))
                    .and_then(|v| v.first())
                    .cloned()
                    .unwrap_or_default();

                Event {
                    name: str_field(item, "name").unwrap_or_default(),
                    date: path_str(item, &["dates", "start", "localDate"]),
                    time: path_str(item, &["dates", "start", "localTime"]),
                    venue: path_str(&venue, &["name"]),
                    city: path_str(&venue, &["city", "name"]),
                    country: path_str(&venue, &["country", "countryCode"]),
                    url: str_field(item, "url").unwrap_or_default(),
                    category: category.to_string(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_events_without_key_are_defaults() {
        let toolbox = offline_toolbox();
        let events = toolbox.events_nearby(&EventQuery::default()).await;

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].name, "Community Meetup");
        assert_eq!(events[1].name, "Community Networking Night");
        assert_eq!(events[2].name, "Community Live Session");
        assert!(events.iter().all(|e| e.city == "New York, NY"));
    }

    #[tokio::test]
    async fn test_events_defaults_use_category_and_location() {
        let toolbox = offline_toolbox();
        let query = EventQuery {
            location: Some("Austin, TX".to_string()),
            category: Some("Music".to_string()),
            ..Default::default()
        };

        let events = toolbox.events_nearby(&query).await;
        assert_eq!(events[0].name, "Music Meetup");
        assert_eq!(events[0].category, "Music");
        assert_eq!(events[0].city, "Austin, TX");
    }

    #[tokio::test]
    async fn test_events_with_key_offline_degrade_to_defaults() {
        let toolbox = offline_toolbox_with(|c| c.providers.ticketmaster_api_key = "tm".to_string());
        let events = toolbox.events_nearby(&EventQuery::default()).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].name, "Community Meetup");
    }

    #[tokio::test]
    async fn test_events_with_key_maps_ticketmaster() {
        let app = Router::new().route(
            "/ticketmaster/events.json",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q["apikey"], "tm");
                assert_eq!(q["city"], "Chicago");
                let events: Vec<Value> = (0..20)
                    .map(|i| {
                        json!({
                            "name": format!("Show {}", i),
                            "url": "https://tm.test/e",
                            "dates": {"start": {"localDate": "2026-03-01", "localTime": "20:00:00"}},
                            "_embedded": {"venues": [{
                                "name": "Arena",
                                "city": {"name": "Chicago"},
                                "country": {"countryCode": "US"}
                            }]}
                        })
                    })
                    .collect();
                Json(json!({"_embedded": {"events": events}}))
            }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |c| {
            c.providers.ticketmaster_api_key = "tm".to_string();
        });
        let query = EventQuery {
            location: Some("Chicago".to_string()),
            ..Default::default()
        };

        let events = toolbox.events_nearby(&query).await;
        assert_eq!(events.len(), MAX_EVENTS);
        assert_eq!(events[0].venue, "Arena");
        assert_eq!(events[0].city, "Chicago");
        assert_eq!(events[0].date, "2026-03-01");
        assert_eq!(events[0].category, "Event");
    }

    #[test]
    fn test_path_str_missing() {
        let value = json!({"a": {"b": 1}});
        assert_eq!(path_str(&value, &["a", "b"]), "1");
        assert_eq!(path_str(&value, &["a", "c"]), "");
    }
}
