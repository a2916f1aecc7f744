//! Append-only, request-coalescing dataset cache.
//!
//! One cache instance owns the memoized collections for one data source;
//! nothing is process-global, so tests and embedders can run independent
//! instances side by side. Entries are keyed by the structural
//! [`PeriodKey`] and never evicted or mutated after insertion — the
//! datasets are immutable snapshots over a bounded period range.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use fire_map_dataset_models::IncidentCollection;
use fire_map_period::{PeriodBounds, PeriodKey};
use tokio::sync::OnceCell;

use crate::{DatasetError, PeriodDataSource};

/// Memoizing cache over a [`PeriodDataSource`].
///
/// Concurrent [`DatasetCache::get`] calls for the same uncached period
/// share a single underlying fetch: each period maps to a
/// [`tokio::sync::OnceCell`] whose initialization runs at most once at a
/// time, so a burst of slider events never issues duplicate requests for
/// the same document.
pub struct DatasetCache<S> {
    source: S,
    bounds: PeriodBounds,
    entries: Mutex<HashMap<PeriodKey, Arc<OnceCell<Arc<IncidentCollection>>>>>,
}

impl<S: PeriodDataSource> DatasetCache<S> {
    /// Creates an empty cache over `source`, admitting only periods
    /// inside `bounds`.
    #[must_use]
    pub fn new(source: S, bounds: PeriodBounds) -> Self {
        Self {
            source,
            bounds,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the dataset for `period`, fetching it on a cache miss.
    ///
    /// On success the collection is cached permanently and shared with
    /// every caller through an [`Arc`]. A failed fetch is NOT cached: the
    /// error is returned and the next call for the same period retries.
    /// A failure for one period never affects entries for other periods.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Period`] if `period` is outside the
    /// configured bounds, or the underlying fetch error.
    pub async fn get(&self, period: PeriodKey) -> Result<Arc<IncidentCollection>, DatasetError> {
        self.bounds.validate(period)?;

        let cell = {
            // The lock only guards the entry map; fetches run outside it.
            // Poisoning cannot leave the append-only map inconsistent.
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(period).or_default())
        };

        if let Some(collection) = cell.get() {
            log::trace!("cache hit for {period}");
            return Ok(Arc::clone(collection));
        }

        let collection = cell
            .get_or_try_init(|| async {
                log::debug!("cache miss for {period}, fetching");
                self.source.fetch_period(period).await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(collection))
    }

    /// Number of periods with a cached collection.
    ///
    /// Entries whose only fetch attempt failed are not counted.
    #[must_use]
    pub fn cached_periods(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// The bounds this cache admits.
    #[must_use]
    pub const fn bounds(&self) -> PeriodBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use fire_map_dataset_models::FireIncident;
    use fire_map_fire_models::FireCause;

    use super::*;

    fn collection_for(period: PeriodKey) -> IncidentCollection {
        IncidentCollection::new(
            "FeatureCollection".to_string(),
            vec![FireIncident {
                year: period.year,
                month: period.month,
                incident_size: Some(42.0),
                cause: FireCause::Natural,
                longitude: -120.5,
                latitude: 38.6,
                incident_name: None,
                discovered_at: None,
            }],
        )
    }

    fn bounds() -> PeriodBounds {
        PeriodBounds::new(2020, 2023)
    }

    /// Counts fetches and optionally stalls so concurrent callers overlap.
    struct CountingSource {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CountingSource {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PeriodDataSource for &CountingSource {
        async fn fetch_period(
            &self,
            period: PeriodKey,
        ) -> Result<IncidentCollection, DatasetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(collection_for(period))
        }
    }

    /// Succeeds for the first `successes` calls, then errors.
    struct ExhaustibleSource {
        calls: AtomicUsize,
        successes: usize,
    }

    #[async_trait]
    impl PeriodDataSource for &ExhaustibleSource {
        async fn fetch_period(
            &self,
            period: PeriodKey,
        ) -> Result<IncidentCollection, DatasetError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.successes {
                Ok(collection_for(period))
            } else {
                Err(DatasetError::Geojson {
                    message: "source exhausted".to_string(),
                })
            }
        }
    }

    /// Fails for the first `failures` calls, then succeeds.
    struct RecoveringSource {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl PeriodDataSource for &RecoveringSource {
        async fn fetch_period(
            &self,
            period: PeriodKey,
        ) -> Result<IncidentCollection, DatasetError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(DatasetError::Geojson {
                    message: "transient upstream failure".to_string(),
                })
            } else {
                Ok(collection_for(period))
            }
        }
    }

    #[tokio::test]
    async fn concurrent_gets_for_one_period_share_a_single_fetch() {
        let source = CountingSource::new(Duration::from_millis(20));
        let cache = DatasetCache::new(&source, bounds());
        let period = PeriodKey::new(2020, 7).unwrap();

        let (a, b) = tokio::join!(cache.get(period), cache.get(period));
        let a = a.unwrap();
        let b = b.unwrap();

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 1);
    }

    #[tokio::test]
    async fn cached_period_is_served_without_refetching() {
        let source = ExhaustibleSource {
            calls: AtomicUsize::new(0),
            successes: 1,
        };
        let cache = DatasetCache::new(&source, bounds());
        let period = PeriodKey::new(2021, 3).unwrap();

        let first = cache.get(period).await.unwrap();
        // The source now errors on any further call, so this only passes
        // if the cache never issues one.
        let second = cache.get(period).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached_periods(), 1);
    }

    #[tokio::test]
    async fn failed_fetches_are_not_cached_and_retry() {
        let source = RecoveringSource {
            calls: AtomicUsize::new(0),
            failures: 1,
        };
        let cache = DatasetCache::new(&source, bounds());
        let period = PeriodKey::new(2022, 9).unwrap();

        let err = cache.get(period).await.unwrap_err();
        assert!(matches!(err, DatasetError::Geojson { .. }));
        assert_eq!(cache.cached_periods(), 0);

        let recovered = cache.get(period).await.unwrap();
        assert_eq!(recovered.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached_periods(), 1);
    }

    #[tokio::test]
    async fn distinct_periods_fetch_independently() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = DatasetCache::new(&source, bounds());

        let july = cache.get(PeriodKey::new(2020, 7).unwrap()).await.unwrap();
        let august = cache.get(PeriodKey::new(2020, 8).unwrap()).await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(cache.cached_periods(), 2);
        assert_eq!(july.incidents[0].month, 7);
        assert_eq!(august.incidents[0].month, 8);
    }

    #[tokio::test]
    async fn out_of_bounds_periods_are_rejected_without_fetching() {
        let source = CountingSource::new(Duration::ZERO);
        let cache = DatasetCache::new(&source, bounds());

        let err = cache
            .get(PeriodKey::new(2019, 12).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DatasetError::Period(_)));
        assert_eq!(source.calls(), 0);
        assert_eq!(cache.cached_periods(), 0);
    }

    #[tokio::test]
    async fn one_failing_period_does_not_block_others() {
        // First call (for the failing period) errors, the rest succeed.
        let source = RecoveringSource {
            calls: AtomicUsize::new(0),
            failures: 1,
        };
        let cache = DatasetCache::new(&source, bounds());

        let bad = PeriodKey::new(2020, 1).unwrap();
        let good = PeriodKey::new(2020, 2).unwrap();

        assert!(cache.get(bad).await.is_err());
        assert!(cache.get(good).await.is_ok());
        assert_eq!(cache.cached_periods(), 1);
    }
}
