//! AWS Lambda handler for refund estimates
//!
//! Accepts `POST /refund` with `{"pin": "..."}`, fetches comparables for the
//! PIN and returns the refund estimate as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Local;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;
use std::sync::Arc;
use tax_refund::service::refund_for_pin;
use tax_refund::{HttpComparablesProvider, RefundConfig, RefundRunner};

/// Input payload
#[derive(Debug, Deserialize)]
struct RefundRequestBody {
    #[serde(default)]
    pin: Option<String>,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response<T: serde::Serialize>(body: &T) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(
    event: Request,
    runner: &RefundRunner,
    provider: &HttpComparablesProvider,
) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    if event.method().as_str() != "POST" {
        return error_response(405, "Method not allowed");
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: RefundRequestBody = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let pin = match request.pin {
        Some(pin) => pin,
        None => return error_response(400, "PIN is required"),
    };

    let today = Local::now().date_naive();
    match refund_for_pin(provider, runner.engine(), &pin, today).await {
        Ok(result) => json_response(&result),
        Err(e) => {
            log::error!("Refund request for {:?} failed: {}", pin, e);
            error_response(e.status_code(), &e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = RefundConfig::from_env();
    let runner = Arc::new(RefundRunner::from_csv(&config.rates_path)?);
    let provider = Arc::new(HttpComparablesProvider::new(&config)?);

    if let Some((first, last)) = runner.rates().year_span() {
        log::info!("Rate table covers {}-{}", first, last);
    }

    run(service_fn(move |event: Request| {
        let runner = Arc::clone(&runner);
        let provider = Arc::clone(&provider);
        async move { handler(event, &runner, &provider).await }
    }))
    .await
}
