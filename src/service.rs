//! Request boundary: PIN in, refund out
//!
//! Sanitizes the requested PIN, fetches comparables, resolves the target and
//! runs the valuation. Failures here are [`ServiceError`]s; business outcomes
//! such as "not over-assessed" come back as a normal [`RefundResult`].

use crate::comparables::{sanitize_pin, ComparablesProvider};
use crate::error::ServiceError;
use crate::property::{ComparableSet, PropertyId};
use crate::rates::RateLookup;
use crate::valuation::{RefundResult, ValuationEngine};
use chrono::NaiveDate;

/// Pick the target record from a comparables response
///
/// The service keys its response by canonical PIN, which may differ in
/// formatting from the requested one. The requested PIN wins when present;
/// otherwise the first record in the response is the target.
pub fn resolve_target(requested: &str, set: &ComparableSet) -> PropertyId {
    let requested = PropertyId::new(requested);
    if set.contains(&requested) {
        return requested;
    }
    set.first_id().cloned().unwrap_or(requested)
}

/// Estimate the refund for a raw, user-supplied PIN
pub async fn refund_for_pin<P, R>(
    provider: &P,
    engine: &ValuationEngine<R>,
    raw_pin: &str,
    evaluation_date: NaiveDate,
) -> Result<RefundResult, ServiceError>
where
    P: ComparablesProvider + Sync,
    R: RateLookup + Sync,
{
    let pin = sanitize_pin(raw_pin);
    if pin.is_empty() {
        return Err(ServiceError::MissingPin);
    }

    let set = provider.fetch(&pin).await.map_err(|err| {
        log::warn!("Comparables fetch for {} failed: {}", pin, err);
        ServiceError::from(err)
    })?;

    let target = resolve_target(&pin, &set);
    let result = engine.compute_refund(&target, &set, evaluation_date);
    log::info!(
        "{}: {} ({} years, refund {:.2})",
        result.property_id,
        result.outcome.as_str(),
        result.years_eligible,
        result.total_refund
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ComparablesError, PropertyError};
    use crate::property::load_comparables_from_str;
    use crate::rates::RateTable;
    use crate::valuation::Outcome;
    use std::sync::Mutex;

    /// Returns canned JSON and records the PINs it was asked for
    struct StubProvider {
        json: Option<&'static str>,
        requested: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn with_json(json: &'static str) -> Self {
            Self { json: Some(json), requested: Mutex::new(Vec::new()) }
        }

        fn unavailable() -> Self {
            Self { json: None, requested: Mutex::new(Vec::new()) }
        }
    }

    impl ComparablesProvider for StubProvider {
        async fn fetch(&self, pin: &str) -> Result<ComparableSet, ComparablesError> {
            self.requested.lock().unwrap().push(pin.to_string());
            match self.json {
                Some(json) => Ok(load_comparables_from_str(json)?),
                None => Err(ComparablesError::Status { status: 502, body: "bad gateway".to_string() }),
            }
        }
    }

    // Target is not the first record, so finding it needs the direct match
    const RESPONSE: &str = r#"{
        "comparable1": {"assessed value": 200000},
        "1011230070000": {"assessed value": 250000, "sale date": "1/15/2020"},
        "comparable2": {"assessed value": 220000}
    }"#;

    fn engine() -> ValuationEngine<RateTable> {
        ValuationEngine::new(RateTable::from_entries((2015..2030).map(|y| (y, 0.03))))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_formatted_pin_is_sanitized() {
        let provider = StubProvider::with_json(RESPONSE);
        let result = refund_for_pin(&provider, &engine(), "10-11-230-070-000", date(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(provider.requested.lock().unwrap().as_slice(), ["1011230070000"]);
        assert_eq!(result.property_id, PropertyId::from("1011230070000"));
        assert_eq!(result.outcome, Outcome::Refundable);
        assert_eq!(result.years_eligible, 3);
        assert!(result.total_refund > 0.0);
    }

    #[tokio::test]
    async fn test_missing_pin() {
        let provider = StubProvider::with_json(RESPONSE);
        let err = refund_for_pin(&provider, &engine(), "invalid", date(2024, 6, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::MissingPin));
        assert!(provider.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_a_zero_result() {
        let provider = StubProvider::unavailable();
        let err = refund_for_pin(&provider, &engine(), "1011230070000", date(2024, 6, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Upstream(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_bad_sale_date_is_data_quality() {
        let provider = StubProvider::with_json(r#"{"5": {"assessed value": 1, "sale date": "yesterday"}}"#);
        let err = refund_for_pin(&provider, &engine(), "5", date(2024, 6, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::DataQuality(PropertyError::InvalidSaleDate { .. })));
    }

    #[tokio::test]
    async fn test_two_digit_sale_year_is_data_quality() {
        let provider = StubProvider::with_json(
            r#"{"5": {"assessed value": 250000, "sale date": "1/15/20"}, "6": {"assessed value": 1}}"#,
        );
        let err = refund_for_pin(&provider, &engine(), "5", date(2024, 6, 1))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::DataQuality(PropertyError::InvalidSaleDate { ref value, .. }) if value == "1/15/20"
        ));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_resolve_target_prefers_requested() {
        let set = load_comparables_from_str(RESPONSE).unwrap();
        assert_eq!(resolve_target("comparable2", &set), PropertyId::from("comparable2"));
        assert_eq!(resolve_target("1011230070000", &set), PropertyId::from("1011230070000"));
        assert_eq!(resolve_target("999", &set), PropertyId::from("comparable1"));
        assert_eq!(resolve_target("999", &ComparableSet::new()), PropertyId::from("999"));
    }
}
