#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Period dataset fetching and the request-coalescing cache.
//!
//! The dashboard requests one GeoJSON document per `(year, month)` period.
//! [`PeriodDataSource`] abstracts where documents come from,
//! [`HttpPeriodSource`] is the production implementation, and
//! [`DatasetCache`] memoizes results per period while coalescing
//! concurrent requests for the same uncached key into a single fetch.

pub mod cache;
pub mod http;
pub mod parsing;
pub mod retry;

use async_trait::async_trait;
use fire_map_dataset_models::IncidentCollection;
use fire_map_period::{PeriodError, PeriodKey};

pub use cache::DatasetCache;
pub use http::HttpPeriodSource;

/// Errors that can occur while loading a period's dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code the server returned.
        status: reqwest::StatusCode,
        /// URL of the failed request.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document was valid JSON but not a usable GeoJSON feature
    /// collection.
    #[error("GeoJSON error: {message}")]
    Geojson {
        /// Description of what went wrong.
        message: String,
    },

    /// Requested period failed validation against the configured bounds.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

/// An asynchronous provider of per-period incident datasets.
///
/// The cache treats implementations as opaque: it never inspects where a
/// collection came from, only whether the fetch succeeded.
#[async_trait]
pub trait PeriodDataSource: Send + Sync {
    /// Fetches the incident collection for one period.
    ///
    /// Implementations must fail explicitly rather than return an empty
    /// collection when the underlying fetch errors; an empty collection
    /// is reserved for periods that genuinely have no incidents.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the fetch or parse fails.
    async fn fetch_period(&self, period: PeriodKey) -> Result<IncidentCollection, DatasetError>;
}
