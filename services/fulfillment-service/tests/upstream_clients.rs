//! Real reqwest clients against a local stub of the upstream providers.

use std::{collections::HashMap, net::SocketAddr, time::Duration};

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use fulfillment_service::{
    astronomy::{ApodClient, AstronomySettings},
    enrichment::{EnrichmentRecord, EnrichmentSource},
    error::FetchError,
    weather::{MeteoblueClient, WeatherSettings},
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn forecast(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("apikey").map(String::as_str) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": true })));
    }
    let body = json!({
        "data_day": {
            "time": ["2025-01-01", "2025-01-02"],
            "temperature_mean": [21.4, 23.0],
            "relativehumidity_mean": [80, 65],
            "precipitation_probability": [90, 10],
            "windspeed_mean": [2.5, 4.0],
            "airqualityindex_mean": [30, 55],
            "uvindex": [3, 9]
        }
    });
    (StatusCode::OK, Json(body))
}

async fn apod(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "date": params.get("date").cloned().unwrap_or_default(),
        "hd": params.get("hd").cloned().unwrap_or_default(),
        "title": "Orion Rising",
        "media_type": "image"
    }))
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "{}"
}

async fn spawn_upstream() -> SocketAddr {
    let router = Router::new()
        .route("/forecast", get(forecast))
        .route("/apod", get(apod))
        .route("/slow", get(slow))
        .route("/not-json", get(not_json));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

fn weather(addr: SocketAddr, path: &str, api_key: &str, timeout: Duration) -> MeteoblueClient {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("client");
    MeteoblueClient::new(
        http,
        WeatherSettings {
            base_url: format!("http://{addr}{path}"),
            api_key: api_key.to_string(),
            lat: -23.5475,
            lon: -46.6361,
            asl: 769,
        },
    )
}

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

#[tokio::test]
async fn weather_record_for_today() {
    let addr = spawn_upstream().await;
    let client = weather(addr, "/forecast", "test-key", Duration::from_secs(5));
    let record = client.fetch(day("2025-01-01")).await.expect("record");
    let EnrichmentRecord::Weather(forecast) = record else {
        panic!("expected weather record");
    };
    assert_eq!(forecast.temperature_mean, Some(21.4));
    assert_eq!(forecast.humidity_mean, Some(80.0));
    assert_eq!(forecast.uv_index, Some(3.0));
}

#[tokio::test]
async fn weather_without_today() {
    let addr = spawn_upstream().await;
    let client = weather(addr, "/forecast", "test-key", Duration::from_secs(5));
    let err = client.fetch(day("2025-01-03")).await.expect_err("no data");
    assert!(matches!(err, FetchError::NoDataForToday(ref date) if date == "2025-01-03"));
}

#[tokio::test]
async fn weather_status_error() {
    let addr = spawn_upstream().await;
    let client = weather(addr, "/forecast", "wrong-key", Duration::from_secs(5));
    let err = client.fetch(day("2025-01-01")).await.expect_err("unauthorized");
    assert!(matches!(err, FetchError::Status(401)));
}

#[tokio::test]
async fn weather_timeout_is_transport_error() {
    let addr = spawn_upstream().await;
    let client = weather(addr, "/slow", "test-key", Duration::from_millis(200));
    let err = client.fetch(day("2025-01-01")).await.expect_err("timeout");
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.is_upstream_fault());
}

#[tokio::test]
async fn weather_garbage_body_is_decode_error() {
    let addr = spawn_upstream().await;
    let client = weather(addr, "/not-json", "test-key", Duration::from_secs(5));
    let err = client.fetch(day("2025-01-01")).await.expect_err("decode");
    assert!(matches!(err, FetchError::Decode(_)));
}

/// Sends headers and part of the body, then stalls.
async fn spawn_stalled_body() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stall");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"data_day\":";
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.flush().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    });
    addr
}

#[tokio::test]
async fn weather_body_timeout_is_transport_error() {
    let addr = spawn_stalled_body().await;
    let client = weather(addr, "/forecast", "test-key", Duration::from_millis(300));
    let err = client.fetch(day("2025-01-01")).await.expect_err("timeout");
    assert!(matches!(err, FetchError::Transport(ref inner) if inner.is_timeout()));
}

#[tokio::test]
async fn apod_body_passes_through() {
    let addr = spawn_upstream().await;
    let client = ApodClient::new(
        reqwest::Client::new(),
        AstronomySettings {
            base_url: format!("http://{addr}/apod"),
            api_key: "DEMO_KEY".to_string(),
            hd: true,
        },
    );
    let record = client.fetch(day("2025-03-14")).await.expect("record");
    assert_eq!(
        record,
        EnrichmentRecord::Astronomy(json!({
            "date": "2025-03-14",
            "hd": "true",
            "title": "Orion Rising",
            "media_type": "image"
        }))
    );
    assert_eq!(record.headline(), "Orion Rising");
}
