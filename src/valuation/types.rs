//! Refund result structures

use crate::property::PropertyId;
use serde::{Deserialize, Serialize};

/// Why a calculation did or did not produce a refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Over-assessed with a sale date on record
    Refundable,
    /// Target PIN not present in the comparables data
    TargetNotFound,
    /// No properties besides the target
    NoComparables,
    /// Assessed value at or below the fair value estimate
    NotOverAssessed,
    /// Target has no recorded sale date
    MissingSaleDate,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Refundable => "refundable",
            Outcome::TargetNotFound => "target_not_found",
            Outcome::NoComparables => "no_comparables",
            Outcome::NotOverAssessed => "not_over_assessed",
            Outcome::MissingSaleDate => "missing_sale_date",
        }
    }
}

/// How the fair value estimate was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairValueMethod {
    /// Weighted by building size similarity to the target
    SizeWeighted,
    /// Plain mean of comparable assessed values (target has no sqft)
    Mean,
}

/// Fair assessed value derived from comparables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairValueEstimate {
    pub value: f64,
    pub method: FairValueMethod,
    /// Number of comparables that contributed to the estimate
    pub contributors: usize,
}

/// Present value of one eligible year's refund
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRefund {
    pub year: i32,
    /// Zero when the rate series has a gap between `year` and the evaluation year
    pub present_value: f64,
}

/// Result of a refund calculation for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResult {
    #[serde(rename = "pin")]
    pub property_id: PropertyId,
    pub years_eligible: u32,
    /// Sum of yearly present values, rounded to cents
    pub total_refund: f64,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fair_value: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub years: Vec<YearlyRefund>,
}

impl RefundResult {
    /// Canonical zero result: no eligible years and no refund
    pub fn zero(property_id: PropertyId, outcome: Outcome) -> Self {
        Self {
            property_id,
            years_eligible: 0,
            total_refund: 0.0,
            outcome,
            fair_value: None,
            years: Vec::new(),
        }
    }

    pub fn with_fair_value(mut self, fair_value: f64) -> Self {
        self.fair_value = Some(fair_value);
        self
    }

    pub fn is_refundable(&self) -> bool {
        self.outcome == Outcome::Refundable
    }
}
