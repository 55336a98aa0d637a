use std::process::ExitCode;

use chrono::Local;
use fulfillment_common::{bind_listener, init_tracing, shutdown_signal};
use fulfillment_service::{
    app,
    config::Config,
    enrichment::EnrichmentSource,
    state::{build_enrichment, AppState},
};

#[tokio::main]
async fn main() -> ExitCode {
    let _guards = init_tracing("fulfillment-service");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if config.missing_credentials() {
        tracing::warn!(provider = %config.provider, "no api key configured for enrichment provider");
    }

    let enrichment = match build_enrichment(&config) {
        Ok(enrichment) => enrichment,
        Err(err) => {
            tracing::error!(error = %err, "enrichment client init failed");
            return ExitCode::FAILURE;
        }
    };
    if config.startup_probe {
        probe(enrichment.as_ref()).await;
    }

    let state = match AppState::new(enrichment, config.verbose_replies) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "action catalog rejected");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(actions = state.catalog.len(), provider = %config.provider, "action catalog ready");

    let listener = match bind_listener(config.port).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, port = config.port, "bind listener failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(port = config.port, "starting fulfillment webhook");

    if let Err(err) = axum::serve(listener, app::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn probe(source: &dyn EnrichmentSource) {
    // One-off check of the upstream; failures only get logged.
    match source.fetch(Local::now().date_naive()).await {
        Ok(record) => tracing::info!(
            provider = source.name(),
            headline = %record.headline(),
            "startup probe succeeded"
        ),
        Err(err) => tracing::warn!(provider = source.name(), error = %err, "startup probe failed"),
    }
}
