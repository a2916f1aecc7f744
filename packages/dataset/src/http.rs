//! HTTP-backed period dataset source.
//!
//! Documents are served as static GeoJSON files under the configured base
//! URL: one file per period at `data/year_month/data_{year}_{month}.geojson`
//! (plain integer month, no zero padding), plus a whole-range document at
//! `data/data_{min_year}_{max_year}.geojson` backing the trend chart.

use std::time::Duration;

use async_trait::async_trait;
use fire_map_dataset_models::{DatasetConfig, IncidentCollection};
use fire_map_period::PeriodKey;

use crate::{DatasetError, PeriodDataSource, parsing, retry};

/// Fetches period datasets from the dashboard's static data endpoint.
#[derive(Debug)]
pub struct HttpPeriodSource {
    client: reqwest::Client,
    config: DatasetConfig,
}

impl HttpPeriodSource {
    /// Creates a source with a client honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: DatasetConfig) -> Result<Self, DatasetError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// The configuration this source was built with.
    #[must_use]
    pub const fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Fetches the whole-range document backing the trend chart.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the fetch or parse fails.
    pub async fn fetch_range(&self) -> Result<IncidentCollection, DatasetError> {
        let url = format!(
            "{}/data/data_{}_{}.geojson",
            self.base_url(),
            self.config.bounds.min_year,
            self.config.bounds.max_year,
        );
        log::debug!("fetching range dataset from {url}");
        let body = retry::send_text(|| self.client.get(&url), self.config.max_retries).await?;
        parsing::parse_feature_collection(&body)
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn period_url(&self, period: PeriodKey) -> String {
        format!(
            "{}/data/year_month/data_{}_{}.geojson",
            self.base_url(),
            period.year,
            period.month,
        )
    }
}

#[async_trait]
impl PeriodDataSource for HttpPeriodSource {
    async fn fetch_period(&self, period: PeriodKey) -> Result<IncidentCollection, DatasetError> {
        let url = self.period_url(period);
        log::debug!("fetching period dataset from {url}");
        let body = retry::send_text(|| self.client.get(&url), self.config.max_retries).await?;
        parsing::parse_feature_collection(&body)
    }
}
