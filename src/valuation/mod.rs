//! Refund valuation: fair value estimation and present-value discounting
//!
//! The calculation runs in three steps:
//! 1. **Fair value**: size-weighted (or plain) average of comparable assessed values
//! 2. **Eligibility**: full calendar years since sale, capped at four
//! 3. **Discounting**: each eligible year's over-assessment compounded forward
//!    through the rate table, summed and rounded to cents
//!
//! # Example
//!
//! ```rust,ignore
//! use tax_refund::{RateTable, ValuationEngine};
//!
//! let engine = ValuationEngine::new(RateTable::from_entries([(2023, 0.03)]));
//! let result = engine.compute_refund(&pin, &comparables, evaluation_date);
//! println!("Refund: {:.2}", result.total_refund);
//! ```

mod discount;
mod engine;
mod types;

pub use discount::{present_value, round_cents, yearly_refunds};
pub use engine::{estimate, estimate_fair_value, ValuationEngine};
pub use types::{FairValueEstimate, FairValueMethod, Outcome, RefundResult, YearlyRefund};
