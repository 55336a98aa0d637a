use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::FetchError;
use crate::weather::DayForecast;

/// Third-party lookup behind the `teste.action` / `opcao_1` branch.
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, today: NaiveDate) -> Result<EnrichmentRecord, FetchError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnrichmentRecord {
    Weather(DayForecast),
    Astronomy(Value),
}

impl EnrichmentRecord {
    /// The single field echoed back to the user.
    pub fn headline(&self) -> String {
        match self {
            EnrichmentRecord::Weather(day) => match day.temperature_mean {
                Some(value) => value.to_string(),
                None => "n/a".to_string(),
            },
            EnrichmentRecord::Astronomy(body) => match body.get("title") {
                Some(Value::String(title)) => title.clone(),
                Some(other) => other.to_string(),
                None => "n/a".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(temperature_mean: Option<f64>) -> DayForecast {
        DayForecast {
            date: "2025-01-02".to_string(),
            temperature_mean,
            humidity_mean: Some(70.0),
            precipitation_probability: Some(20.0),
            wind_speed: Some(3.1),
            air_quality_index: Some(41.0),
            uv_index: Some(7.0),
        }
    }

    #[test]
    fn weather_headline_is_temperature() {
        assert_eq!(EnrichmentRecord::Weather(day(Some(22.5))).headline(), "22.5");
        assert_eq!(EnrichmentRecord::Weather(day(Some(19.0))).headline(), "19");
        assert_eq!(EnrichmentRecord::Weather(day(None)).headline(), "n/a");
    }

    #[test]
    fn astronomy_headline_is_title() {
        let record = EnrichmentRecord::Astronomy(json!({ "title": "The Horsehead Nebula" }));
        assert_eq!(record.headline(), "The Horsehead Nebula");
        assert_eq!(EnrichmentRecord::Astronomy(json!({})).headline(), "n/a");
    }
}
