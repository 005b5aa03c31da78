//! Property data structures matching the comparables service format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque property identifier (PIN)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PropertyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single property record, either the target or a comparable
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Value assigned by the taxing authority
    pub assessed_value: f64,

    /// Building area in square feet, if recorded
    pub building_sqft: Option<f64>,

    /// Most recent sale date (only meaningful for the target)
    pub sale_date: Option<NaiveDate>,
}

impl Property {
    /// Property with only an assessed value
    pub fn new(assessed_value: f64) -> Self {
        Self {
            assessed_value,
            building_sqft: None,
            sale_date: None,
        }
    }

    pub fn with_sqft(mut self, sqft: f64) -> Self {
        self.building_sqft = Some(sqft);
        self
    }

    pub fn with_sale_date(mut self, sale_date: NaiveDate) -> Self {
        self.sale_date = Some(sale_date);
        self
    }
}

/// Target property plus its comparables, keyed by identifier
///
/// Entries keep insertion order. Inserting an id that is already present
/// replaces the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparableSet {
    entries: Vec<(PropertyId, Property)>,
}

impl ComparableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PropertyId, property: Property) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = property,
            None => self.entries.push((id, property)),
        }
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, property)| property)
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.get(id).is_some()
    }

    /// Every entry except the given target
    pub fn comparables_for<'a>(&'a self, target: &'a PropertyId) -> impl Iterator<Item = &'a Property> + 'a {
        self.entries
            .iter()
            .filter(move |(id, _)| id != target)
            .map(|(_, property)| property)
    }

    /// First identifier in insertion order
    pub fn first_id(&self) -> Option<&PropertyId> {
        self.entries.first().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PropertyId, Property)> for ComparableSet {
    fn from_iter<I: IntoIterator<Item = (PropertyId, Property)>>(iter: I) -> Self {
        let mut set = ComparableSet::new();
        for (id, property) in iter {
            set.insert(id, property);
        }
        set
    }
}
