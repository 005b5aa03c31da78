//! Comparables service client
//!
//! The comparables service answers `GET {base_url}/comp?pin={pin}` with a JSON
//! object keyed by PIN holding the requested property and its comparables.

use crate::config::RefundConfig;
use crate::error::{ComparablesError, PropertyError};
use crate::property::{decode_comparables, ComparableSet};
use serde_json::{Map, Value};
use std::future::Future;

/// Source of comparables data for a PIN
pub trait ComparablesProvider {
    fn fetch(&self, pin: &str) -> impl Future<Output = Result<ComparableSet, ComparablesError>> + Send;
}

/// Strip every non-digit character from a user-supplied PIN
pub fn sanitize_pin(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// HTTP client for the comparables service
#[derive(Debug, Clone)]
pub struct HttpComparablesProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpComparablesProvider {
    pub fn new(config: &RefundConfig) -> Result<Self, ComparablesError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tax_refund/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.comparables_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ComparablesProvider for HttpComparablesProvider {
    async fn fetch(&self, pin: &str) -> Result<ComparableSet, ComparablesError> {
        let url = format!("{}/comp", self.base_url);
        log::info!("Fetching comparables for {} from {}", pin, url);

        let resp = self.http.get(&url).query(&[("pin", pin)]).send().await?;
        let resp = check_response(resp).await?;
        let body = resp.bytes().await?;
        decode_body(pin, &body)
    }
}

/// Decode a successful response body
///
/// A body that is not a JSON object keyed by PIN is bad data from the
/// service, not a transport failure, so it surfaces as a decode error.
fn decode_body(pin: &str, body: &[u8]) -> Result<ComparableSet, ComparablesError> {
    let map: Map<String, Value> = serde_json::from_slice(body).map_err(PropertyError::from)?;

    if map.is_empty() {
        return Err(ComparablesError::Empty { pin: pin.to_string() });
    }

    Ok(decode_comparables(map)?)
}

/// Reject non-success responses, keeping the body for diagnostics
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ComparablesError> {
    if !resp.status().is_success() {
        return Err(ComparablesError::Status {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
