//! NeoWs feed data model
//!
//! A feed maps ISO dates to lists of raw records. Per-date values are kept as
//! raw JSON so that a value with the wrong shape degrades to an empty
//! selection rather than rejecting the document.

mod record;

pub use record::{
    CloseApproach, DiameterRange, EstimatedDiameter, MissDistance, NearEarthObjectRecord,
    NumericValue, RelativeVelocity,
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Feed document errors
#[derive(Error, Debug)]
pub enum DataError {
    /// Document is not JSON, or not a JSON object
    #[error("Feed parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed file could not be read
    #[error("Feed IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which date's records become the scene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateSelection {
    /// Earliest date key in the feed
    #[default]
    First,
    /// A specific ISO date key
    Date(String),
}

impl DateSelection {
    /// Select a specific ISO date key
    pub fn date(key: impl Into<String>) -> Self {
        Self::Date(key.into())
    }
}

/// A NeoWs `feed` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeoFeed {
    /// Total record count as reported by the feed
    #[serde(default)]
    pub element_count: Option<u64>,
    /// Records per ISO date
    #[serde(default, deserialize_with = "lenient_date_map")]
    pub near_earth_objects: BTreeMap<String, Value>,
}

fn lenient_date_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => {
            log::warn!("near_earth_objects is not an object ({}), treating feed as empty", json_kind(&other));
            Ok(BTreeMap::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl NeoFeed {
    /// Parse a feed document
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a feed document from a reader
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, DataError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a feed file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Build a single-date feed from typed records
    pub fn single_date(date: impl Into<String>, records: &[NearEarthObjectRecord]) -> Self {
        let entries = records
            .iter()
            .filter_map(|record| serde_json::to_value(record).ok())
            .collect::<Vec<_>>();
        let mut near_earth_objects = BTreeMap::new();
        near_earth_objects.insert(date.into(), Value::Array(entries));
        Self {
            element_count: Some(records.len() as u64),
            near_earth_objects,
        }
    }

    /// Date keys in chronological order
    pub fn date_keys(&self) -> impl Iterator<Item = &str> {
        self.near_earth_objects.keys().map(String::as_str)
    }

    /// Resolve a selection to its date key and raw record list
    ///
    /// Returns `None` when the key is absent or its value is not a list.
    pub fn select(&self, selection: &DateSelection) -> Option<(&str, &[Value])> {
        let (key, value) = match selection {
            DateSelection::First => self.near_earth_objects.iter().next()?,
            DateSelection::Date(key) => self.near_earth_objects.get_key_value(key)?,
        };
        match value {
            Value::Array(entries) => Some((key.as_str(), entries.as_slice())),
            other => {
                log::warn!("Records for {} are a {}, not a list", key, json_kind(other));
                None
            }
        }
    }
}
