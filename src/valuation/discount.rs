//! Present value of past-year refunds
//!
//! A refund owed for a past year is compounded forward to the evaluation year
//! using the year-indexed rate table. A single missing year anywhere in the
//! range invalidates that refund year entirely.

use super::types::YearlyRefund;
use crate::rates::RateLookup;

/// Compound `amount` from `refund_year` up to (excluding) `evaluation_year`
///
/// Returns 0.0 when any year in `refund_year..evaluation_year` has no rate.
pub fn present_value<R: RateLookup + ?Sized>(
    amount: f64,
    refund_year: i32,
    rates: &R,
    evaluation_year: i32,
) -> f64 {
    match rates.compound_factor(refund_year, evaluation_year) {
        Some(factor) => amount * factor,
        None => {
            log::warn!(
                "Rate series incomplete between {} and {}; refund year contributes 0",
                refund_year,
                evaluation_year
            );
            0.0
        }
    }
}

/// Present value of the refund for each of the `years_eligible` years before
/// the evaluation year, most recent first
pub fn yearly_refunds<R: RateLookup + ?Sized>(
    amount: f64,
    years_eligible: u32,
    rates: &R,
    evaluation_year: i32,
) -> Vec<YearlyRefund> {
    (1..=years_eligible as i32)
        .map(|offset| {
            let year = evaluation_year - offset;
            YearlyRefund {
                year,
                present_value: present_value(amount, year, rates, evaluation_year),
            }
        })
        .collect()
}

/// Round to the nearest cent of the stored binary value
///
/// Scaling by 100 first can turn a value just below a half cent (2.675 is
/// stored as 2.67499999...) into an exact half and round it the wrong way.
/// The formatter rounds the exact value instead.
pub fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
