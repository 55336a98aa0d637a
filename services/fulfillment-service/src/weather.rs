use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::enrichment::{EnrichmentRecord, EnrichmentSource};
use crate::error::FetchError;
use crate::redact;

pub const DEFAULT_METEOBLUE_URL: &str = "https://my.meteoblue.com/packages/basic-day_airquality-day";

/// Location and credentials for the meteoblue daily package.
#[derive(Clone, Debug)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: String,
    pub lat: f64,
    pub lon: f64,
    pub asl: i32,
}

#[derive(Deserialize, Debug)]
pub struct DailyPackage {
    pub data_day: DataDay,
}

/// Parallel per-day arrays, all indexed like `time`.
#[derive(Deserialize, Debug, Default)]
pub struct DataDay {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub relativehumidity_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub airqualityindex_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub uvindex: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayForecast {
    pub date: String,
    pub temperature_mean: Option<f64>,
    pub humidity_mean: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub wind_speed: Option<f64>,
    pub air_quality_index: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Picks `today` out of the parallel arrays.
pub fn select_day(data: &DataDay, today: NaiveDate) -> Result<DayForecast, FetchError> {
    let date = today.format("%Y-%m-%d").to_string();
    let index = data
        .time
        .iter()
        .position(|day| *day == date)
        .ok_or_else(|| FetchError::NoDataForToday(date.clone()))?;

    // A short array leaves the field empty instead of failing the whole day.
    let at = |series: &[Option<f64>]| series.get(index).copied().flatten();

    Ok(DayForecast {
        temperature_mean: at(&data.temperature_mean),
        humidity_mean: at(&data.relativehumidity_mean),
        precipitation_probability: at(&data.precipitation_probability),
        wind_speed: at(&data.windspeed_mean),
        air_quality_index: at(&data.airqualityindex_mean),
        uv_index: at(&data.uvindex),
        date,
    })
}

pub struct MeteoblueClient {
    http: reqwest::Client,
    settings: WeatherSettings,
}

impl MeteoblueClient {
    pub fn new(http: reqwest::Client, settings: WeatherSettings) -> Self {
        Self { http, settings }
    }

    pub async fn fetch_package(&self) -> Result<DailyPackage, FetchError> {
        let request = self
            .http
            .get(self.settings.base_url.as_str())
            .query(&[
                ("apikey", self.settings.api_key.clone()),
                ("lat", self.settings.lat.to_string()),
                ("lon", self.settings.lon.to_string()),
                ("asl", self.settings.asl.to_string()),
                ("format", "json".to_string()),
            ])
            .build()?;
        tracing::info!(url = %redact::url(request.url()), "fetching daily weather");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "weather upstream rejected request");
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.json::<DailyPackage>().await?)
    }
}

#[async_trait]
impl EnrichmentSource for MeteoblueClient {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn fetch(&self, today: NaiveDate) -> Result<EnrichmentRecord, FetchError> {
        let package = self.fetch_package().await?;
        let day = select_day(&package.data_day, today)?;
        tracing::debug!(
            date = %day.date,
            temperature_mean = ?day.temperature_mean,
            humidity_mean = ?day.humidity_mean,
            precipitation_probability = ?day.precipitation_probability,
            wind_speed = ?day.wind_speed,
            air_quality_index = ?day.air_quality_index,
            uv_index = ?day.uv_index,
            "weather for today"
        );
        Ok(EnrichmentRecord::Weather(day))
    }
}
