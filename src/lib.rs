//! Tax Refund - Property tax refund estimation from comparable properties
//!
//! This library provides:
//! - Fair value estimation from comparables (size-weighted or plain average)
//! - Refund eligibility counting in full calendar years
//! - Present-value discounting through a year-indexed interest rate table
//! - Comparables service client and batch evaluation

pub mod comparables;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod property;
pub mod rates;
pub mod runner;
pub mod service;
pub mod valuation;

// Re-export commonly used types
pub use comparables::{ComparablesProvider, HttpComparablesProvider};
pub use config::RefundConfig;
pub use eligibility::{full_calendar_years, MAX_ELIGIBLE_YEARS};
pub use property::{ComparableSet, Property, PropertyId};
pub use rates::{RateLookup, RateTable};
pub use runner::{RefundRequest, RefundRunner};
pub use valuation::{Outcome, RefundResult, ValuationEngine};
