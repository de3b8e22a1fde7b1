//! AED facilities and the snapshot feed they arrive in.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A known AED location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Only active facilities are eligible as nearest-facility candidates.
    #[serde(default)]
    pub active: bool,
}

impl Facility {
    /// Create an active facility.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            active: true,
        }
    }

    /// Mark this facility inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Error loading a facility snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// The facility feed: an object keyed by record id.
///
/// Keys are held sorted so iteration order is stable across loads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FacilitySnapshot {
    records: BTreeMap<String, Facility>,
}

impl FacilitySnapshot {
    /// Parse a snapshot from its JSON form.
    ///
    /// Records without an `active` flag are treated as inactive.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of records, active or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Active facilities in key order.
    pub fn active_facilities(&self) -> Vec<Facility> {
        self.records.values().filter(|f| f.active).cloned().collect()
    }
}
