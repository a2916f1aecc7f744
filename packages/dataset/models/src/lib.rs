#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildfire incident record types and dataset configuration.
//!
//! An [`IncidentCollection`] is the in-memory form of one GeoJSON document
//! from the dataset endpoint. Collections are immutable snapshots: filters
//! produce new collections, and the dataset cache hands out shared
//! references rather than copies.

use chrono::{DateTime, Utc};
use fire_map_fire_models::FireCause;
use fire_map_period::{PeriodBounds, PeriodKey};
use serde::{Deserialize, Serialize};

/// One wildfire incident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireIncident {
    /// Calendar year the incident is filed under.
    pub year: i32,
    /// Month of year (1-12) the incident is filed under.
    pub month: u8,
    /// Acres burned. `None` when the source record lacks a size.
    pub incident_size: Option<f64>,
    /// Normalized cause classification.
    pub cause: FireCause,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Incident name from the source record, if present.
    pub incident_name: Option<String>,
    /// When the fire was discovered, if the source record carries a
    /// timestamp.
    pub discovered_at: Option<DateTime<Utc>>,
}

impl FireIncident {
    /// The reporting period this incident is filed under.
    ///
    /// The month is validated when the record is parsed from GeoJSON, so
    /// the key is built directly from the stored fields.
    #[must_use]
    pub const fn period(&self) -> PeriodKey {
        PeriodKey {
            year: self.year,
            month: self.month,
        }
    }
}

/// An ordered collection of incidents parsed from one GeoJSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentCollection {
    /// Format tag of the source document (`"FeatureCollection"`).
    pub format: String,
    /// Incident records in document order.
    pub incidents: Vec<FireIncident>,
}

impl IncidentCollection {
    /// Creates a collection from already-parsed incidents.
    #[must_use]
    pub const fn new(format: String, incidents: Vec<FireIncident>) -> Self {
        Self { format, incidents }
    }

    /// An empty collection with the standard format tag.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            format: "FeatureCollection".to_string(),
            incidents: Vec::new(),
        }
    }

    /// Number of incidents in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Returns `true` if the collection holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

/// Configuration for the dataset endpoint and fetch behavior.
///
/// Loaded from a TOML file by the CLI; defaults describe the observed
/// deployment (data for 2020-2023, slider anchored at January 2020).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Base URL the GeoJSON documents are served under.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry attempts for transient HTTP failures.
    pub max_retries: u32,
    /// Year addressed by date slider index 0.
    pub base_year: i32,
    /// Inclusive year range the deployment ships data for.
    pub bounds: PeriodBounds,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            base_year: 2020,
            bounds: PeriodBounds::new(2020, 2023),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incident_period_uses_stored_year_and_month() {
        let incident = FireIncident {
            year: 2021,
            month: 7,
            incident_size: Some(120.5),
            cause: FireCause::Natural,
            longitude: -120.3,
            latitude: 39.1,
            incident_name: None,
            discovered_at: None,
        };
        assert_eq!(incident.period(), PeriodKey::new(2021, 7).unwrap());
    }

    #[test]
    fn empty_collection_has_standard_format_tag() {
        let collection = IncidentCollection::empty();
        assert_eq!(collection.format, "FeatureCollection");
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn config_defaults_match_observed_deployment() {
        let config = DatasetConfig::default();
        assert_eq!(config.base_year, 2020);
        assert_eq!(config.bounds, PeriodBounds::new(2020, 2023));
        assert_eq!(config.max_retries, 3);
    }
}
