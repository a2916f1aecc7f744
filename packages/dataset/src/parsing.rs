//! GeoJSON document parsing for the wildfire incident feed.
//!
//! The feed's features carry their period and attributes in `properties`
//! (`year`, `month`, `IncidentSize`, `FireCause`, `IncidentName`,
//! `FireDiscoveryDateTime`) with a point geometry. A malformed document
//! is an error; a malformed individual feature inside a well-formed
//! document is skipped.

use chrono::{DateTime, NaiveDateTime, Utc};
use fire_map_dataset_models::{FireIncident, IncidentCollection};
use fire_map_fire_models::FireCause;
use geojson::GeoJson;

use crate::DatasetError;

/// Parses a GeoJSON `FeatureCollection` document into an
/// [`IncidentCollection`].
///
/// Features without a point geometry or without numeric `year`/`month`
/// properties are skipped with a debug log; the document itself failing
/// to parse is an error.
///
/// # Errors
///
/// Returns [`DatasetError::Geojson`] if the document is not valid GeoJSON
/// or is not a `FeatureCollection`.
pub fn parse_feature_collection(doc: &str) -> Result<IncidentCollection, DatasetError> {
    let geojson: GeoJson = doc.parse().map_err(|e: geojson::Error| DatasetError::Geojson {
        message: e.to_string(),
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DatasetError::Geojson {
            message: "expected a FeatureCollection document".to_string(),
        });
    };

    let total = collection.features.len();
    let mut incidents = Vec::with_capacity(total);

    for feature in &collection.features {
        if let Some(incident) = parse_feature(feature) {
            incidents.push(incident);
        }
    }

    if incidents.len() < total {
        log::debug!(
            "skipped {} of {total} features without point geometry or period properties",
            total - incidents.len(),
        );
    }

    Ok(IncidentCollection::new(
        "FeatureCollection".to_string(),
        incidents,
    ))
}

/// Parses a single feature, returning `None` if it lacks a point
/// geometry or a valid period.
#[allow(clippy::cast_possible_truncation)]
fn parse_feature(feature: &geojson::Feature) -> Option<FireIncident> {
    let geometry = feature.geometry.as_ref()?;
    let geojson::Value::Point(position) = &geometry.value else {
        return None;
    };
    let longitude = *position.first()?;
    let latitude = *position.get(1)?;

    let props = feature.properties.as_ref()?;
    let year = i32::try_from(props.get("year")?.as_i64()?).ok()?;
    let month = props.get("month")?.as_u64()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    let incident_size = props
        .get("IncidentSize")
        .and_then(serde_json::Value::as_f64);
    let cause = FireCause::from_property(
        props.get("FireCause").and_then(serde_json::Value::as_str),
    );
    let incident_name = props
        .get("IncidentName")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from);
    let discovered_at = props
        .get("FireDiscoveryDateTime")
        .and_then(serde_json::Value::as_str)
        .and_then(parse_discovery_date);

    Some(FireIncident {
        year,
        month: month as u8,
        incident_size,
        cause,
        longitude,
        latitude,
        incident_name,
        discovered_at,
    })
}

/// Parses the feed's discovery timestamp (ISO 8601, with or without
/// fractional seconds).
fn parse_discovery_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-120.5, 38.6] },
                "properties": {
                    "year": 2020,
                    "month": 7,
                    "IncidentSize": 152.3,
                    "FireCause": "Human",
                    "IncidentName": "River Fire",
                    "FireDiscoveryDateTime": "2020-07-04T13:45:00"
                }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-118.1, 36.2] },
                "properties": {
                    "year": 2020,
                    "month": 7,
                    "FireCause": "Lightning Strike?"
                }
            }
        ]
    }"#;

    #[test]
    fn parses_the_observed_property_schema() {
        let collection = parse_feature_collection(DOC).unwrap();
        assert_eq!(collection.format, "FeatureCollection");
        assert_eq!(collection.len(), 2);

        let first = &collection.incidents[0];
        assert_eq!(first.year, 2020);
        assert_eq!(first.month, 7);
        assert_eq!(first.incident_size, Some(152.3));
        assert_eq!(first.cause, FireCause::Human);
        assert_eq!(first.incident_name.as_deref(), Some("River Fire"));
        assert!((first.longitude - -120.5).abs() < f64::EPSILON);
        assert!((first.latitude - 38.6).abs() < f64::EPSILON);
        assert!(first.discovered_at.is_some());
    }

    #[test]
    fn missing_size_and_unrecognized_cause_normalize() {
        let collection = parse_feature_collection(DOC).unwrap();
        let second = &collection.incidents[1];
        assert_eq!(second.incident_size, None);
        assert_eq!(second.cause, FireCause::Unknown);
        assert_eq!(second.incident_name, None);
        assert_eq!(second.discovered_at, None);
    }

    #[test]
    fn skips_features_without_period_or_point_geometry() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-120.5, 38.6] },
                    "properties": { "FireCause": "Human" }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-120.5, 38.6], [-120.6, 38.7]]
                    },
                    "properties": { "year": 2020, "month": 7 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-120.5, 38.6] },
                    "properties": { "year": 2020, "month": 13 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-120.5, 38.6] },
                    "properties": { "year": 2020, "month": 7 }
                }
            ]
        }"#;
        let collection = parse_feature_collection(doc).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn empty_feature_collection_is_a_valid_empty_result() {
        let collection =
            parse_feature_collection(r#"{ "type": "FeatureCollection", "features": [] }"#)
                .unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn rejects_non_collection_documents() {
        let err = parse_feature_collection(
            r#"{ "type": "Point", "coordinates": [-120.5, 38.6] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Geojson { .. }));
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = parse_feature_collection("not json at all").unwrap_err();
        assert!(matches!(err, DatasetError::Geojson { .. }));
    }

    #[test]
    fn parses_discovery_dates_with_and_without_fractional_seconds() {
        assert!(parse_discovery_date("2020-07-04T13:45:00.000").is_some());
        assert!(parse_discovery_date("2020-07-04T13:45:00").is_some());
        assert!(parse_discovery_date("07/04/2020").is_none());
    }
}
