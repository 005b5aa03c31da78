//! Year-indexed interest rate table used to compound refunds forward

pub mod loader;

pub use loader::{load_rate_table, load_rate_table_from_reader, DEFAULT_RATES_PATH};

use std::collections::{BTreeMap, HashMap};

/// Read-only access to annual rates by calendar year
///
/// A missing year is a defined "unknown rate" condition, not an error.
pub trait RateLookup {
    fn lookup(&self, year: i32) -> Option<f64>;

    /// Product of `(1 + rate)` for every year in `from..to`
    ///
    /// Returns `None` as soon as a year in the range has no rate. An empty
    /// range (`from >= to`) compounds to 1.0.
    fn compound_factor(&self, from: i32, to: i32) -> Option<f64> {
        (from..to).try_fold(1.0, |product, year| self.lookup(year).map(|rate| product * (1.0 + rate)))
    }
}

/// Immutable mapping from calendar year to annual rate (e.g. 0.03 for 3%)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<i32, f64>,
}

impl RateTable {
    pub fn from_entries<I: IntoIterator<Item = (i32, f64)>>(entries: I) -> Self {
        Self {
            rates: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// First and last year with a recorded rate
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.rates.keys().next()?;
        let last = self.rates.keys().next_back()?;
        Some((*first, *last))
    }
}

impl RateLookup for RateTable {
    fn lookup(&self, year: i32) -> Option<f64> {
        self.rates.get(&year).copied()
    }
}

impl RateLookup for HashMap<i32, f64> {
    fn lookup(&self, year: i32) -> Option<f64> {
        self.get(&year).copied()
    }
}

impl<T: RateLookup + ?Sized> RateLookup for &T {
    fn lookup(&self, year: i32) -> Option<f64> {
        (**self).lookup(year)
    }
}
