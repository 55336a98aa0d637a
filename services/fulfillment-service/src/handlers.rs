use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde_json::Value;

use crate::dispatch::dispatch;
use crate::error::RequestError;
use crate::models::{FulfillmentResponse, IntentRequest};
use crate::redact;
use crate::state::AppState;

pub async fn home() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn dialogflow(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected webhook body");
            return RequestError::from(rejection).into_response();
        }
    };

    tracing::info!(body = %redact::value(&body), "received webhook");

    let request = match IntentRequest::from_body(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "malformed webhook");
            return err.into_response();
        }
    };

    match request.callback_token.as_deref() {
        Some(token) => tracing::info!(callback_data = token, "callback_data found"),
        None => tracing::info!("callback_data not found"),
    }
    tracing::info!(action = %request.action, "dispatching action");
    let parameters = Value::Object(request.parameters.clone());
    tracing::debug!(parameters = %parameters, "action parameters");

    let texts = dispatch(&state, &request, Local::now().date_naive()).await;
    (StatusCode::OK, Json(FulfillmentResponse::from_texts(texts))).into_response()
}
