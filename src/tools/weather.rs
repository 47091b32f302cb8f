//! Weather tools.
//!
//! [`Toolbox::local_weather`] is the text report used by the router.
//! [`Toolbox::weather_summary`] backs the weather endpoint and keeps its own
//! response cache on top of the fetch cache, so a fully failed refresh can
//! still answer with the last summary before falling back to fixed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::fetch::FetchOptions;
use crate::Result;

use super::{array_field, str_field, with_params, Toolbox, WEATHER_SUMMARY_KEY};

/// Temperature units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    fn symbol(&self) -> &'static str {
        match self {
            Units::Celsius => "C",
            Units::Fahrenheit => "F",
        }
    }

    fn openweather_param(&self) -> &'static str {
        match self {
            Units::Celsius => "metric",
            Units::Fahrenheit => "imperial",
        }
    }
}

/// Current conditions. Values are strings as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub condition: String,
    pub temp_c: String,
    pub temp_f: String,
    pub feels_like_c: String,
    pub feels_like_f: String,
    pub humidity: String,
}

impl WeatherSummary {
    /// Fixed conditions served when no data was ever fetched.
    pub fn fallback() -> Self {
        Self {
            condition: "Partly Cloudy".to_string(),
            temp_c: "20".to_string(),
            temp_f: "68".to_string(),
            feels_like_c: "19".to_string(),
            feels_like_f: "66".to_string(),
            humidity: "65".to_string(),
        }
    }

    /// Map a wttr.in `format=j1` document.
    fn from_wttr(data: &Value) -> Self {
        let empty = Value::Null;
        let current = array_field(data, "current_condition").first().unwrap_or(&empty);
        let condition = array_field(current, "weatherDesc")
            .first()
            .and_then(|d| str_field(d, "value"))
            .unwrap_or_else(|| "Unknown".to_string());
        let field = |key: &str| str_field(current, key).unwrap_or_else(|| "0".to_string());

        Self {
            condition,
            temp_c: field("temp_C"),
            temp_f: field("temp_F"),
            feels_like_c: field("FeelsLikeC"),
            feels_like_f: field("FeelsLikeF"),
            humidity: field("humidity"),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Toolbox {
    /// Text weather report for the default location.
    ///
    /// Uses OpenWeatherMap when a key is configured and wttr.in otherwise.
    pub async fn local_weather(&self, units: Units) -> String {
        let result = if self.providers.openweather_api_key.is_empty() {
            self.wttr_report().await
        } else {
            self.openweather_report(units).await
        };

        match result {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "weather unavailable, using default text");
                self.default_weather_text()
            }
        }
    }

    async fn openweather_report(&self, units: Units) -> Result<String> {
        let location = &self.location.default_location;
        let url = with_params(
            &format!("{}/weather", self.endpoints.openweather),
            &[
                ("q", location.as_str()),
                ("appid", self.providers.openweather_api_key.as_str()),
                ("units", units.openweather_param()),
            ],
        )?;
        let data = self.fetch.json(&url, &FetchOptions::new()).await?;

        let main = data.get("main").cloned().unwrap_or_default();
        let reading = |key: &str| str_field(&main, key).unwrap_or_else(|| "N/A".to_string());
        let description = array_field(&data, "weather")
            .first()
            .and_then(|w| str_field(w, "description"))
            .unwrap_or_else(|| "N/A".to_string());
        let wind = data
            .get("wind")
            .and_then(|w| str_field(w, "speed"))
            .unwrap_or_else(|| "N/A".to_string());
        let unit = units.symbol();

        Ok(format!(
            "🌤️ Weather for {location}:\n\n\
             Temperature: {}°{unit}\n\
             Feels like: {}°{unit}\n\
             Condition: {}\n\
             Humidity: {}%\n\
             Wind Speed: {wind} m/s",
            reading("temp"),
            reading("feels_like"),
            capitalize(&description),
            reading("humidity"),
        ))
    }

    async fn wttr_report(&self) -> Result<String> {
        let url = format!("{}?format=3", self.endpoints.wttr);
        let text = self.fetch.text(&url, &FetchOptions::new()).await?;
        Ok(format!("Weather:\n\n{}", text.trim_end()))
    }

    fn default_weather_text(&self) -> String {
        format!(
            "🌤️ Weather for {}:\n\n\
             Configure OPENWEATHER_API_KEY for real weather data\n\
             • Get free key at https://openweathermap.org/api",
            self.location.default_location
        )
    }

    /// Current conditions summary.
    ///
    /// Order of preference: a fresh cached summary, a new fetch with the
    /// short timeout, the last summary regardless of age, fixed values.
    pub async fn weather_summary(&self) -> WeatherSummary {
        if let Some(summary) = self.weather_cache.get(WEATHER_SUMMARY_KEY) {
            return summary;
        }

        let url = format!("{}?format=j1", self.endpoints.wttr);
        let options = FetchOptions::new().with_timeout(self.fetch.short_timeout());

        let summary = match self.fetch.json(&url, &options).await {
            Ok(data) => WeatherSummary::from_wttr(&data),
            Err(e) => {
                if let Some(stale) = self.weather_cache.get_stale_or_fresh(WEATHER_SUMMARY_KEY) {
                    warn!(error = %e, "weather summary refresh failed, serving last summary");
                    return stale;
                }
                warn!(error = %e, "weather summary unavailable, using fallback conditions");
                WeatherSummary::fallback()
            }
        };

        self.weather_cache
            .put(WEATHER_SUMMARY_KEY, summary.clone(), self.weather_ttl);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn wttr_j1() -> Value {
        json!({
            "current_condition": [{
                "temp_C": "12",
                "temp_F": "54",
                "FeelsLikeC": "10",
                "FeelsLikeF": "50",
                "humidity": "80",
                "weatherDesc": [{"value": "Light rain"}]
            }]
        })
    }

    #[test]
    fn test_summary_from_wttr() {
        let summary = WeatherSummary::from_wttr(&wttr_j1());
        assert_eq!(summary.condition, "Light rain");
        assert_eq!(summary.temp_c, "12");
        assert_eq!(summary.feels_like_f, "50");
        assert_eq!(summary.humidity, "80");
    }

    #[test]
    fn test_summary_from_empty_document() {
        let summary = WeatherSummary::from_wttr(&json!({}));
        assert_eq!(summary.condition, "Unknown");
        assert_eq!(summary.temp_c, "0");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_weather_summary_offline_falls_back() {
        let toolbox = offline_toolbox();
        let summary = toolbox.weather_summary().await;

        assert_eq!(summary, WeatherSummary::fallback());
        assert_eq!(summary.condition, "Partly Cloudy");
        assert_eq!(summary.temp_f, "68");
    }

    #[tokio::test]
    async fn test_weather_summary_second_tier_cache() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/wttr",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(wttr_j1())
                }
            }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |_| {});

        let first = toolbox.weather_summary().await;
        let second = toolbox.weather_summary().await;

        assert_eq!(first.condition, "Light rain");
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_weather_summary_serves_stale_summary() {
        let toolbox = offline_toolbox();
        let previous = WeatherSummary {
            condition: "Sunny".to_string(),
            ..WeatherSummary::fallback()
        };
        toolbox.weather_cache.put(
            WEATHER_SUMMARY_KEY,
            previous.clone(),
            std::time::Duration::ZERO,
        );

        assert_eq!(toolbox.weather_summary().await, previous);
    }

    #[tokio::test]
    async fn test_local_weather_wttr_text() {
        let app = Router::new().route("/wttr", get(|| async { "New York: ⛅️ +20°C\n" }));
        let toolbox = toolbox_at(&spawn_stub(app).await, |_| {});

        assert_eq!(
            toolbox.local_weather(Units::Celsius).await,
            "Weather:\n\nNew York: ⛅️ +20°C"
        );
    }

    #[tokio::test]
    async fn test_local_weather_openweather() {
        let app = Router::new().route(
            "/openweather/weather",
            get(|| async {
                Json(json!({
                    "main": {"temp": 21.5, "feels_like": 20, "humidity": 40},
                    "weather": [{"description": "clear sky"}],
                    "wind": {"speed": 3.1}
                }))
            }),
        );
        let toolbox = toolbox_at(&spawn_stub(app).await, |c| {
            c.providers.openweather_api_key = "ow".to_string();
        });

        let report = toolbox.local_weather(Units::Fahrenheit).await;
        assert!(report.starts_with("🌤️ Weather for New York, NY:"));
        assert!(report.contains("Temperature: 21.5°F"));
        assert!(report.contains("Condition: Clear sky"));
        assert!(report.contains("Wind Speed: 3.1 m/s"));
    }

    #[tokio::test]
    async fn test_local_weather_offline_default_text() {
        let report = offline_toolbox().local_weather(Units::Celsius).await;
        assert!(report.contains("Configure OPENWEATHER_API_KEY"));
    }
}
