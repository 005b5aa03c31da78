//! Refund eligibility window
//!
//! Counts the full calendar years between a sale date and the evaluation
//! date. The statutory refund window is bounded to four years.

use chrono::{Datelike, NaiveDate};

/// Maximum number of years a refund may be claimed for
pub const MAX_ELIGIBLE_YEARS: u32 = 4;

/// Number of full calendar years of eligibility, in `[0, MAX_ELIGIBLE_YEARS]`
///
/// Years strictly between the sale year and the evaluation year always count.
/// The sale year counts as well when the sale closed on January 1, and the
/// evaluation year counts when evaluating on December 31. The bonuses are
/// added after the base is floored at zero, so a Jan 1 sale evaluated on
/// Dec 31 of the same year yields 2.
pub fn full_calendar_years(sale_date: NaiveDate, evaluation_date: NaiveDate) -> u32 {
    let base = evaluation_date.year() - sale_date.year() - 1;
    let mut years = base.max(0) as u32;

    if sale_date.month() == 1 && sale_date.day() == 1 {
        years += 1;
    }

    if evaluation_date.month() == 12 && evaluation_date.day() == 31 {
        years += 1;
    }

    years.min(MAX_ELIGIBLE_YEARS)
}
