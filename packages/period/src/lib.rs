#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reporting period keys and the date slider codec.
//!
//! A [`PeriodKey`] is the canonical `(year, month)` identifier used for
//! caching, grouping, and sorting. It is compared and hashed structurally
//! on the numeric pair, so chronological order never depends on a
//! formatted label and two spellings of the same period can never collide
//! as distinct cache keys.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from period construction and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1-12.
    #[error("invalid month {month}: expected 1-12")]
    InvalidMonth {
        /// The rejected month value.
        month: u8,
    },

    /// Period outside the configured year range.
    #[error("period {period} outside supported range {min_year}-{max_year}")]
    OutOfRange {
        /// The rejected period.
        period: PeriodKey,
        /// First supported year.
        min_year: i32,
        /// Last supported year.
        max_year: i32,
    },
}

/// A `(year, month)` reporting period.
///
/// `Ord` follows the numeric `(year, month)` tuple, which makes a sorted
/// sequence of keys chronological by construction. [`std::fmt::Display`]
/// renders the `M/YYYY` label shown next to the dashboard's date slider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u8,
}

impl PeriodKey {
    /// Creates a period key, validating the month.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidMonth`] if `month` is outside 1-12.
    pub const fn new(year: i32, month: u8) -> Result<Self, PeriodError> {
        if month == 0 || month > 12 {
            return Err(PeriodError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// The period one month after this one, carrying into the next year
    /// after December.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The period one month before this one, borrowing from the previous
    /// year before January.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{}/{}", self.month, self.year))
    }
}

/// Converts between a linear date slider index and [`PeriodKey`] values.
///
/// Index 0 is January of the base year; each step advances one month.
/// The base year is injected rather than hardcoded so deployments with a
/// different data range (and tests) can supply their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodCodec {
    base_year: i32,
}

impl PeriodCodec {
    /// Creates a codec anchored at January of `base_year`.
    #[must_use]
    pub const fn new(base_year: i32) -> Self {
        Self { base_year }
    }

    /// Year addressed by slider index 0.
    #[must_use]
    pub const fn base_year(self) -> i32 {
        self.base_year
    }

    /// Period addressed by a slider index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn period_for_index(self, index: u32) -> PeriodKey {
        PeriodKey {
            year: self.base_year + (index / 12) as i32,
            month: (index % 12) as u8 + 1,
        }
    }

    /// Slider index addressing a period.
    ///
    /// Returns `None` for periods before the base year, which have no
    /// slider position.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_lossless)]
    pub const fn index_for_period(self, period: PeriodKey) -> Option<u32> {
        if period.year < self.base_year {
            return None;
        }
        Some((period.year - self.base_year) as u32 * 12 + (period.month as u32 - 1))
    }
}

/// Inclusive year range a deployment ships data for.
///
/// The observed deployment covers 2020-2023, but the range is
/// configuration, not code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBounds {
    /// First supported year.
    pub min_year: i32,
    /// Last supported year.
    pub max_year: i32,
}

impl PeriodBounds {
    /// Creates a bounds covering `min_year` through `max_year` inclusive.
    #[must_use]
    pub const fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    /// First period in the range.
    #[must_use]
    pub const fn first(self) -> PeriodKey {
        PeriodKey {
            year: self.min_year,
            month: 1,
        }
    }

    /// Last period in the range.
    #[must_use]
    pub const fn last(self) -> PeriodKey {
        PeriodKey {
            year: self.max_year,
            month: 12,
        }
    }

    /// Returns `true` if `period` falls inside the range and has a valid
    /// month.
    #[must_use]
    pub const fn contains(self, period: PeriodKey) -> bool {
        period.month >= 1
            && period.month <= 12
            && period.year >= self.min_year
            && period.year <= self.max_year
    }

    /// Validates a period against this range.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidMonth`] for an out-of-range month and
    /// [`PeriodError::OutOfRange`] for a year outside the configured
    /// bounds.
    pub const fn validate(self, period: PeriodKey) -> Result<(), PeriodError> {
        if period.month == 0 || period.month > 12 {
            return Err(PeriodError::InvalidMonth {
                month: period.month,
            });
        }
        if period.year < self.min_year || period.year > self.max_year {
            return Err(PeriodError::OutOfRange {
                period,
                min_year: self.min_year,
                max_year: self.max_year,
            });
        }
        Ok(())
    }
}
