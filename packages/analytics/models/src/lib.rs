#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregated time-series record types for the trend view.

use fire_map_period::PeriodKey;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one reporting period.
///
/// Produced by the monthly aggregator; one record per period that has at
/// least one incident. Periods with no incidents are simply absent from
/// the output rather than zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    /// Period the statistics cover.
    pub period: PeriodKey,
    /// Number of incidents filed under the period.
    pub incident_count: u64,
    /// Total acres burned across the period's incidents. Records without
    /// a size contribute 0 acres but still count as incidents.
    pub total_acres_burned: f64,
}
