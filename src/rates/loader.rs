//! CSV-based rate table loader
//!
//! Loads `Year,Rate` rows. Rows with a blank year or rate are skipped.

use super::RateTable;
use crate::error::RateTableError;
use std::io::Read;
use std::path::Path;

/// Default path to the interest rate table
pub const DEFAULT_RATES_PATH: &str = "data/interest_rates.csv";

/// Raw CSV row matching interest_rates.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "Rate")]
    rate: Option<f64>,
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<RateTable, RateTableError> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let (year, rate) = match (row.year, row.rate) {
            (Some(year), Some(rate)) => (year, rate),
            _ => {
                skipped += 1;
                continue;
            }
        };

        // A rate at or below -100% would zero or flip the compounding product
        if !rate.is_finite() || rate <= -1.0 {
            return Err(RateTableError::InvalidRate { year, rate });
        }
        entries.push((year, rate));
    }

    let table = RateTable::from_entries(entries);
    log::info!("Loaded {} interest rates ({} blank rows skipped)", table.len(), skipped);
    Ok(table)
}

/// Load the rate table from a CSV file
pub fn load_rate_table<P: AsRef<Path>>(path: P) -> Result<RateTable, RateTableError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_rows(reader)
}

/// Load the rate table from any reader (e.g., string buffer, network stream)
pub fn load_rate_table_from_reader<R: Read>(reader: R) -> Result<RateTable, RateTableError> {
    let csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_rows(csv_reader)
}
