//! Station dataset ingestion and lookup.
//!
//! A [`Dataset`] is built once per query session from CSV or JSON source
//! records and is read-only afterwards. Records with missing or blank
//! coordinates are dropped at load time; they never receive a neighbor
//! rank. Filtering produces a new collection, the source rows are not
//! mutated.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::Result;
use crate::{ChargerType, GeoPoint, StationId, StationRecord};

/// A raw source record as it appears in the CSV/JSON feed.
///
/// All fields are optional; validation happens when the record is
/// converted into a [`StationRecord`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStationRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Integer charger type code, mapped via [`ChargerType::from_code`].
    #[serde(default, rename = "type")]
    pub type_code: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Ordered collection of station records with O(1) id lookup.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<StationRecord>,
    index: HashMap<StationId, usize>,
}

impl Dataset {
    /// Build a dataset from raw source records.
    ///
    /// Records without finite, in-range coordinates are dropped. Records
    /// without an id get a positional one derived from the source row.
    pub fn from_raw_records(raw: Vec<RawStationRecord>) -> Self {
        let total = raw.len();
        let mut records = Vec::with_capacity(total);
        let mut index = HashMap::with_capacity(total);

        for (row, record) in raw.into_iter().enumerate() {
            let (latitude, longitude) = match (record.latitude, record.longitude) {
                (Some(lat), Some(lng)) => (lat, lng),
                _ => {
                    debug!("dropping row {row}: missing coordinates");
                    continue;
                }
            };

            let point = GeoPoint::new(latitude, longitude);
            if !point.is_valid() {
                debug!("dropping row {row}: invalid coordinates ({latitude}, {longitude})");
                continue;
            }

            let id = record
                .id
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| format!("station-{row}"));

            if index.contains_key(&id) {
                warn!("dropping row {row}: duplicate station id '{id}'");
                continue;
            }

            let station = StationRecord {
                id: id.clone(),
                point,
                charger_type: ChargerType::from_code(record.type_code.unwrap_or(0)),
                address: record.address.unwrap_or_default(),
                city: record.city.unwrap_or_default(),
                state: normalize_state(&record.state.unwrap_or_default()),
            };

            index.insert(id, records.len());
            records.push(station);
        }

        if records.len() < total {
            debug!(
                "dataset loaded {} of {} rows ({} dropped)",
                records.len(),
                total,
                total - records.len()
            );
        }

        Self { records, index }
    }

    /// Build a dataset directly from validated records (used by tests).
    pub fn from_records(records: Vec<StationRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { records, index }
    }

    /// Load a dataset from a JSON array of raw records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawStationRecord> = serde_json::from_str(json)?;
        Ok(Self::from_raw_records(raw))
    }

    /// Load a dataset from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load a dataset from a CSV file with a header row.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut raw = Vec::new();
        for record in reader.deserialize() {
            let record: RawStationRecord = record?;
            raw.push(record);
        }
        Ok(Self::from_raw_records(raw))
    }

    /// Get a record by station id.
    pub fn get(&self, id: &str) -> Option<&StationRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Iterate records in load order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// Iterate station ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = &StationId> {
        self.records.iter().map(|r| &r.id)
    }

    /// All station coordinates in load order.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.records.iter().map(|r| r.point).collect()
    }

    /// Number of eligible records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no eligible records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records filtered by state, as a new collection.
    pub fn in_state(&self, state: &str) -> Vec<&StationRecord> {
        let wanted = normalize_state(state);
        self.records
            .iter()
            .filter(|r| r.state.eq_ignore_ascii_case(&wanted))
            .collect()
    }

    /// Records filtered by city, as a new collection.
    pub fn in_city(&self, city: &str) -> Vec<&StationRecord> {
        self.records
            .iter()
            .filter(|r| r.city.eq_ignore_ascii_case(city))
            .collect()
    }
}

/// Fixed lookup correcting the misspelled state names that appear in the
/// public charger feed. Unknown names pass through trimmed.
pub fn normalize_state(state: &str) -> String {
    let trimmed = state.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "karnatka" => "Karnataka".to_string(),
        "tamilnadu" | "tamil nadu" => "Tamil Nadu".to_string(),
        "maharastra" => "Maharashtra".to_string(),
        "telengana" => "Telangana".to_string(),
        "kerela" => "Kerala".to_string(),
        "orissa" => "Odisha".to_string(),
        "pondicherry" => "Puducherry".to_string(),
        "delhi ncr" | "new delhi" => "Delhi".to_string(),
        _ => trimmed.to_string(),
    }
}
