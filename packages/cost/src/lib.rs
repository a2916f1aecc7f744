#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Annual wildfire suppression cost lookup.
//!
//! A second, unrelated read-only dataset alongside the geospatial feed: a
//! single JSON document mapping year to total suppression cost. It is
//! loaded once at startup, so unlike the per-period datasets there is no
//! request coalescing to worry about.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading the cost dataset.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Year → total suppression cost, in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionCosts {
    costs: BTreeMap<i32, f64>,
}

impl SuppressionCosts {
    /// Creates a lookup from an already-loaded mapping.
    #[must_use]
    pub const fn new(costs: BTreeMap<i32, f64>) -> Self {
        Self { costs }
    }

    /// Parses the cost document (a JSON object keyed by year).
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Json`] if the document is malformed.
    pub fn from_json(doc: &str) -> Result<Self, CostError> {
        Ok(Self {
            costs: serde_json::from_str(doc)?,
        })
    }

    /// Fetches and parses the cost document from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`CostError`] if the request fails, the server answers
    /// with a non-success status, or the body is malformed.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self, CostError> {
        log::debug!("loading suppression costs from {url}");
        let body = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Self::from_json(&body)
    }

    /// Total cost for `year`, or `None` when the dataset has no entry.
    #[must_use]
    pub fn cost_for_year(&self, year: i32) -> Option<f64> {
        self.costs.get(&year).copied()
    }

    /// Iterates `(year, cost)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.costs.iter().map(|(year, cost)| (*year, *cost))
    }

    /// Number of years in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns `true` if the dataset holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
