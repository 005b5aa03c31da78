//! Core valuation engine: fair value, over-assessment and refund totals

use super::discount::{round_cents, yearly_refunds};
use super::types::{FairValueEstimate, FairValueMethod, Outcome, RefundResult};
use crate::eligibility::full_calendar_years;
use crate::property::{ComparableSet, Property, PropertyId};
use crate::rates::RateLookup;
use chrono::{Datelike, NaiveDate};

/// Estimate the fair assessed value of `target` from its comparables
///
/// When the target has a recorded building size, comparables are weighted by
/// `1 / (|target_sqft - comparable_sqft| + 1)` and comparables without a size
/// are left out. Otherwise every comparable counts equally. An estimate with
/// no contributors has value 0.
pub fn estimate<'a, I>(target: &Property, comparables: I) -> FairValueEstimate
where
    I: IntoIterator<Item = &'a Property>,
{
    match target.building_sqft {
        None => {
            let (sum, count) = comparables
                .into_iter()
                .fold((0.0, 0usize), |(sum, count), comp| (sum + comp.assessed_value, count + 1));
            FairValueEstimate {
                value: if count > 0 { sum / count as f64 } else { 0.0 },
                method: FairValueMethod::Mean,
                contributors: count,
            }
        }
        Some(target_sqft) => {
            let mut total_weight = 0.0;
            let mut weighted_sum = 0.0;
            let mut contributors = 0;

            for comp in comparables {
                if let Some(comp_sqft) = comp.building_sqft {
                    // +1 keeps an exact size match finite
                    let weight = 1.0 / ((target_sqft - comp_sqft).abs() + 1.0);
                    total_weight += weight;
                    weighted_sum += weight * comp.assessed_value;
                    contributors += 1;
                }
            }

            FairValueEstimate {
                value: if total_weight > 0.0 { weighted_sum / total_weight } else { 0.0 },
                method: FairValueMethod::SizeWeighted,
                contributors,
            }
        }
    }
}

/// Fair assessed value of `target` (see [`estimate`])
pub fn estimate_fair_value<'a, I>(target: &Property, comparables: I) -> f64
where
    I: IntoIterator<Item = &'a Property>,
{
    estimate(target, comparables).value
}

/// Refund calculator bound to a rate table
///
/// The engine holds no other state, so one instance can serve any number of
/// concurrent calculations.
#[derive(Debug, Clone)]
pub struct ValuationEngine<R> {
    rates: R,
}

impl<R: RateLookup> ValuationEngine<R> {
    pub fn new(rates: R) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &R {
        &self.rates
    }

    /// Estimate the refund owed to `target_id` as of `evaluation_date`
    pub fn compute_refund(
        &self,
        target_id: &PropertyId,
        set: &ComparableSet,
        evaluation_date: NaiveDate,
    ) -> RefundResult {
        let target = match set.get(target_id) {
            Some(target) => target,
            None => return RefundResult::zero(target_id.clone(), Outcome::TargetNotFound),
        };

        let comparables: Vec<&Property> = set.comparables_for(target_id).collect();
        if comparables.is_empty() {
            return RefundResult::zero(target_id.clone(), Outcome::NoComparables);
        }

        let fair = estimate(target, comparables);
        log::debug!(
            "{}: fair value {:.2} ({:?}, {} contributors), assessed {:.2}",
            target_id,
            fair.value,
            fair.method,
            fair.contributors,
            target.assessed_value
        );

        if target.assessed_value <= fair.value {
            return RefundResult::zero(target_id.clone(), Outcome::NotOverAssessed)
                .with_fair_value(fair.value);
        }

        let sale_date = match target.sale_date {
            Some(date) => date,
            None => {
                return RefundResult::zero(target_id.clone(), Outcome::MissingSaleDate)
                    .with_fair_value(fair.value)
            }
        };

        let years_eligible = full_calendar_years(sale_date, evaluation_date);
        let refund_amount = target.assessed_value - fair.value;
        let years = yearly_refunds(refund_amount, years_eligible, &self.rates, evaluation_date.year());
        let total: f64 = years.iter().map(|y| y.present_value).sum();

        log::debug!(
            "{}: {} eligible years, raw refund {:.2}, total {:.2}",
            target_id,
            years_eligible,
            refund_amount,
            total
        );

        RefundResult {
            property_id: target_id.clone(),
            years_eligible,
            total_refund: round_cents(total),
            outcome: Outcome::Refundable,
            fair_value: Some(fair.value),
            years,
        }
    }
}
