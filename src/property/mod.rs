//! Property data structures and comparables loading

mod data;
pub mod loader;

pub use data::{ComparableSet, Property, PropertyId};
pub use loader::{
    decode_comparables, load_comparables, load_comparables_from_reader, load_comparables_from_str,
    parse_sale_date,
};
