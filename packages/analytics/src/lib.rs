#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure filtering and aggregation over incident collections.
//!
//! Both operations are deterministic and side-effect free: the cause
//! filter produces a new collection without touching its input, and the
//! monthly aggregator folds incidents into chronologically ordered
//! per-period statistics for the trend chart.

use std::collections::BTreeMap;

use fire_map_analytics_models::MonthlyAggregate;
use fire_map_dataset_models::{FireIncident, IncidentCollection};
use fire_map_fire_models::CausePredicate;
use fire_map_period::PeriodKey;

/// Returns the subsequence of incidents passing the cause filter,
/// preserving the collection's format tag and the original relative
/// order.
///
/// [`CausePredicate::Any`] yields a content-equal copy of the input;
/// callers must not assume the original allocation is reused. Incidents
/// with an unknown cause pass only the `Any` filter.
#[must_use]
pub fn filter_by_cause(
    collection: &IncidentCollection,
    predicate: CausePredicate,
) -> IncidentCollection {
    let incidents = collection
        .incidents
        .iter()
        .filter(|incident| predicate.matches(incident.cause))
        .cloned()
        .collect();
    IncidentCollection::new(collection.format.clone(), incidents)
}

/// Folds incidents into per-period aggregates, ascending by
/// `(year, month)`.
///
/// Grouping and sorting both use the structural [`PeriodKey`] order, so
/// the output is chronological regardless of input order. A record with a
/// missing or non-finite size still increments the period's incident
/// count; it just contributes 0 acres. An empty input yields an empty
/// output.
#[must_use]
pub fn aggregate_by_month(incidents: &[FireIncident]) -> Vec<MonthlyAggregate> {
    let mut groups: BTreeMap<PeriodKey, (u64, f64)> = BTreeMap::new();

    for incident in incidents {
        let (count, acres) = groups.entry(incident.period()).or_insert((0, 0.0));
        *count += 1;
        *acres += incident
            .incident_size
            .filter(|size| size.is_finite())
            .unwrap_or(0.0);
    }

    groups
        .into_iter()
        .map(|(period, (incident_count, total_acres_burned))| MonthlyAggregate {
            period,
            incident_count,
            total_acres_burned,
        })
        .collect()
}
