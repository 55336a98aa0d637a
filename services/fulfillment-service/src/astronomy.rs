use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::enrichment::{EnrichmentRecord, EnrichmentSource};
use crate::error::FetchError;
use crate::redact;

pub const DEFAULT_APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

#[derive(Clone, Debug)]
pub struct AstronomySettings {
    pub base_url: String,
    pub api_key: String,
    pub hd: bool,
}

/// Picture-of-the-day lookup; the body is passed through untouched.
pub struct ApodClient {
    http: reqwest::Client,
    settings: AstronomySettings,
}

impl ApodClient {
    pub fn new(http: reqwest::Client, settings: AstronomySettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl EnrichmentSource for ApodClient {
    fn name(&self) -> &'static str {
        "astronomy"
    }

    async fn fetch(&self, today: NaiveDate) -> Result<EnrichmentRecord, FetchError> {
        let request = self
            .http
            .get(self.settings.base_url.as_str())
            .query(&[
                ("apikey", self.settings.api_key.clone()),
                ("date", today.format("%Y-%m-%d").to_string()),
                ("hd", self.settings.hd.to_string()),
                ("format", "json".to_string()),
            ])
            .build()?;
        tracing::info!(url = %redact::url(request.url()), "fetching picture of the day");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "astronomy upstream rejected request");
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.json::<Value>().await?;
        Ok(EnrichmentRecord::Astronomy(body))
    }
}
