//! Decode comparables data from the comparables service JSON format
//!
//! The service returns an object keyed by PIN:
//!
//! ```json
//! {
//!   "1011230070000": {"assessed value": 250000, "building sqft": 1800, "sale date": "1/15/2020"},
//!   "1011230080000": {"assessed value": 200000}
//! }
//! ```

use super::{ComparableSet, Property, PropertyId};
use crate::error::PropertyError;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Date format used by the comparables service
pub const SALE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Raw record matching the comparables service fields
#[derive(Debug, serde::Deserialize)]
struct RawProperty {
    #[serde(rename = "assessed value")]
    assessed_value: f64,
    #[serde(rename = "building sqft", default)]
    building_sqft: Option<f64>,
    #[serde(rename = "sale date", default)]
    sale_date: Option<String>,
}

impl RawProperty {
    fn to_property(self, pin: &str) -> Result<Property, PropertyError> {
        if !self.assessed_value.is_finite() || self.assessed_value < 0.0 {
            return Err(PropertyError::InvalidAssessedValue {
                pin: pin.to_string(),
                value: self.assessed_value,
            });
        }

        if let Some(sqft) = self.building_sqft {
            if !sqft.is_finite() || sqft < 0.0 {
                return Err(PropertyError::InvalidBuildingSqft {
                    pin: pin.to_string(),
                    value: sqft,
                });
            }
        }

        let sale_date = match self.sale_date {
            Some(raw) => parse_sale_date(pin, &raw)?,
            None => None,
        };

        Ok(Property {
            assessed_value: self.assessed_value,
            building_sqft: self.building_sqft,
            sale_date,
        })
    }
}

/// Parse a `MM/DD/YYYY` sale date. Blank input means no sale date recorded.
pub fn parse_sale_date(pin: &str, raw: &str) -> Result<Option<NaiveDate>, PropertyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || PropertyError::InvalidSaleDate {
        pin: pin.to_string(),
        value: raw.to_string(),
    };

    // %Y accepts any digit count; "1/15/20" would otherwise land in year 20
    let year = trimmed.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, SALE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| invalid())
}

/// Decode an already-parsed JSON object keyed by PIN
pub fn decode_comparables(map: Map<String, Value>) -> Result<ComparableSet, PropertyError> {
    let mut set = ComparableSet::new();

    for (pin, value) in map {
        let raw: RawProperty = serde_json::from_value(value).map_err(|source| PropertyError::Record {
            pin: pin.clone(),
            source,
        })?;
        let property = raw.to_property(&pin)?;
        set.insert(PropertyId::new(pin), property);
    }

    log::debug!("Decoded {} properties", set.len());
    Ok(set)
}

/// Load comparables from a JSON string
pub fn load_comparables_from_str(json: &str) -> Result<ComparableSet, PropertyError> {
    let map: Map<String, Value> = serde_json::from_str(json)?;
    decode_comparables(map)
}

/// Load comparables from any reader (e.g., file, network stream)
pub fn load_comparables_from_reader<R: Read>(reader: R) -> Result<ComparableSet, PropertyError> {
    let map: Map<String, Value> = serde_json::from_reader(reader)?;
    decode_comparables(map)
}

/// Load comparables from a JSON file
pub fn load_comparables<P: AsRef<Path>>(path: P) -> Result<ComparableSet, PropertyError> {
    let file = File::open(path)?;
    load_comparables_from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "1011230070000": {"assessed value": 250000, "sale date": "1/15/2020"},
        "comparable1": {"assessed value": 200000, "building sqft": 1500},
        "comparable2": {"assessed value": 220000, "sale date": ""}
    }"#;

    #[test]
    fn test_load_sample() {
        let set = load_comparables_from_str(SAMPLE).expect("sample should decode");
        assert_eq!(set.len(), 3);
        assert_eq!(set.first_id(), Some(&PropertyId::from("1011230070000")));

        let target = set.get(&"1011230070000".into()).unwrap();
        assert_eq!(target.assessed_value, 250_000.0);
        assert_eq!(target.sale_date, NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(target.building_sqft, None);

        let comp1 = set.get(&"comparable1".into()).unwrap();
        assert_eq!(comp1.building_sqft, Some(1500.0));

        let comp2 = set.get(&"comparable2".into()).unwrap();
        assert_eq!(comp2.sale_date, None);
    }

    #[test]
    fn test_parse_padded_and_unpadded_dates() {
        assert_eq!(
            parse_sale_date("1", "06/05/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 5)
        );
        assert_eq!(
            parse_sale_date("1", "6/5/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 5)
        );
        assert_eq!(parse_sale_date("1", "   ").unwrap(), None);
    }

    #[test]
    fn test_unparsable_sale_date_is_an_error() {
        let json = r#"{"1": {"assessed value": 1000, "sale date": "2020-01-15"}}"#;
        let err = load_comparables_from_str(json).unwrap_err();
        assert!(matches!(err, PropertyError::InvalidSaleDate { ref pin, .. } if pin == "1"));
    }

    #[test]
    fn test_short_year_rejected() {
        for raw in ["1/15/20", "1/15/202", "1/15/02020", "1/15/+202"] {
            assert!(
                matches!(parse_sale_date("7", raw), Err(PropertyError::InvalidSaleDate { .. })),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        let json = r#"{"1": {"assessed value": -5}}"#;
        assert!(matches!(
            load_comparables_from_str(json),
            Err(PropertyError::InvalidAssessedValue { .. })
        ));

        let json = r#"{"1": {"assessed value": 5, "building sqft": -100}}"#;
        assert!(matches!(
            load_comparables_from_str(json),
            Err(PropertyError::InvalidBuildingSqft { .. })
        ));
    }

    #[test]
    fn test_missing_assessed_value_names_the_record() {
        let json = r#"{"42": {"building sqft": 900}}"#;
        let err = load_comparables_from_str(json).unwrap_err();
        assert!(matches!(err, PropertyError::Record { ref pin, .. } if pin == "42"));
    }

    #[test]
    fn test_non_object_payload() {
        assert!(matches!(
            load_comparables_from_str("[1, 2, 3]"),
            Err(PropertyError::Json(_))
        ));
    }
}
