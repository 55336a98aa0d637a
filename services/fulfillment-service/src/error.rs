use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Inbound payloads the webhook refuses to dispatch.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body is not valid JSON")]
    InvalidJson,
    #[error("request is missing a JSON content type")]
    MissingContentType,
    #[error("request body has no queryResult object")]
    MissingQueryResult,
}

impl RequestError {
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidJson => "invalid_json",
            RequestError::MissingContentType => "missing_content_type",
            RequestError::MissingQueryResult => "missing_query_result",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            RequestError::InvalidJson => "request body must be a JSON object",
            RequestError::MissingContentType => "Content-Type must be application/json",
            RequestError::MissingQueryResult => "queryResult is required",
        }
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => RequestError::MissingContentType,
            _ => RequestError::InvalidJson,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                code: self.code(),
                message: self.message(),
            }),
        )
            .into_response()
    }
}

/// Why an enrichment lookup produced no record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("no data for {0}")]
    NoDataForToday(String),
}

impl FetchError {
    /// Only the missing-day case is a designed reply; the rest are upstream faults.
    pub fn is_upstream_fault(&self) -> bool {
        !matches!(self, FetchError::NoDataForToday(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("action {0:?} is registered twice")]
    DuplicateAction(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown enrichment provider {0:?} (expected \"weather\" or \"astronomy\")")]
    UnknownProvider(String),
    #[error("http client could not be built: {0}")]
    HttpClient(#[source] reqwest::Error),
}
