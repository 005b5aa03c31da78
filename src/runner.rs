//! Refund runner for single and batch estimates
//!
//! Pre-loads the rate table once, then evaluates any number of requests
//! against it without re-reading the CSV file.

use crate::error::{PropertyError, RateTableError};
use crate::property::{decode_comparables, ComparableSet, PropertyId};
use crate::rates::{load_rate_table, RateTable};
use crate::valuation::{RefundResult, ValuationEngine};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One property to evaluate: the target PIN plus its comparables data
#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub pin: PropertyId,
    pub comparables: ComparableSet,
}

/// Raw batch entry: `{"pin": "...", "comparables": {pin: record, ...}}`
#[derive(Debug, serde::Deserialize)]
struct RawRequest {
    pin: String,
    comparables: Map<String, Value>,
}

/// Load a JSON array of refund requests from any reader
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<Vec<RefundRequest>, PropertyError> {
    let raw: Vec<RawRequest> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .map(|entry| {
            Ok(RefundRequest {
                pin: PropertyId::new(entry.pin),
                comparables: decode_comparables(entry.comparables)?,
            })
        })
        .collect()
}

/// Load a JSON array of refund requests from a file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<RefundRequest>, PropertyError> {
    let file = File::open(path)?;
    load_requests_from_reader(BufReader::new(file))
}

/// Pre-loaded refund runner
///
/// # Example
/// ```ignore
/// let runner = RefundRunner::from_csv("data/interest_rates.csv")?;
/// let results = runner.run_batch(&requests, evaluation_date);
/// ```
#[derive(Debug, Clone)]
pub struct RefundRunner {
    engine: ValuationEngine<RateTable>,
}

impl RefundRunner {
    /// Create runner with a pre-built rate table
    pub fn new(rates: RateTable) -> Self {
        Self {
            engine: ValuationEngine::new(rates),
        }
    }

    /// Create runner by loading the rate table from CSV
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        Ok(Self::new(load_rate_table(path)?))
    }

    pub fn engine(&self) -> &ValuationEngine<RateTable> {
        &self.engine
    }

    pub fn rates(&self) -> &RateTable {
        self.engine.rates()
    }

    /// Evaluate a single request
    pub fn run(&self, request: &RefundRequest, evaluation_date: NaiveDate) -> RefundResult {
        self.engine
            .compute_refund(&request.pin, &request.comparables, evaluation_date)
    }

    /// Evaluate many requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[RefundRequest], evaluation_date: NaiveDate) -> Vec<RefundResult> {
        requests
            .par_iter()
            .map(|request| self.run(request, evaluation_date))
            .collect()
    }
}
