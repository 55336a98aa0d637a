use std::sync::Arc;

use crate::astronomy::ApodClient;
use crate::config::{Config, Provider};
use crate::enrichment::EnrichmentSource;
use crate::error::{CatalogError, ConfigError};
use crate::intent::ActionCatalog;
use crate::weather::MeteoblueClient;

/// Read-only request context shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ActionCatalog>,
    pub enrichment: Arc<dyn EnrichmentSource>,
    pub verbose_replies: bool,
}

impl AppState {
    pub fn new(
        enrichment: Arc<dyn EnrichmentSource>,
        verbose_replies: bool,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Arc::new(ActionCatalog::new()?),
            enrichment,
            verbose_replies,
        })
    }
}

pub fn build_enrichment(config: &Config) -> Result<Arc<dyn EnrichmentSource>, ConfigError> {
    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .map_err(ConfigError::HttpClient)?;

    let source: Arc<dyn EnrichmentSource> = match config.provider {
        Provider::Weather => Arc::new(MeteoblueClient::new(http, config.weather.clone())),
        Provider::Astronomy => Arc::new(ApodClient::new(http, config.astronomy.clone())),
    };
    Ok(source)
}
