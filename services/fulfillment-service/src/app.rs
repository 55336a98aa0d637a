use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{dialogflow, healthz, home};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).post(home))
        .route("/healthz", get(healthz))
        .route("/dialogflow", post(dialogflow))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
