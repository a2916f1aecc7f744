#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fire cause taxonomy types and filter predicates.
//!
//! Every incident record carries a [`FireCause`] normalized from the raw
//! `FireCause` property of the upstream GeoJSON feed. [`CausePredicate`] is
//! the categorical filter selected by the dashboard's cause radio control.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Cause classification for a wildfire incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FireCause {
    /// Human-caused ignition (campfires, equipment, arson, ...)
    Human,
    /// Natural ignition (lightning)
    Natural,
    /// Cause missing from the source record or not yet determined
    Unknown,
}

impl FireCause {
    /// Normalizes the raw `FireCause` property value from the upstream
    /// GeoJSON feed.
    ///
    /// The feed uses the literal strings `"Human"` and `"Natural"`;
    /// anything else (absent field, empty string, `"Undetermined"`, ...)
    /// maps to [`Self::Unknown`].
    #[must_use]
    pub fn from_property(value: Option<&str>) -> Self {
        match value {
            Some("Human") => Self::Human,
            Some("Natural") => Self::Natural,
            _ => Self::Unknown,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Human, Self::Natural, Self::Unknown]
    }
}

/// Categorical filter over incident causes.
///
/// [`Self::Any`] passes every incident through, including those with an
/// unknown cause. [`Self::Human`] and [`Self::Natural`] match only the
/// exact cause, so unknown-cause incidents appear under `Any` and nowhere
/// else.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CausePredicate {
    /// No filtering; the full collection passes through.
    Any,
    /// Only human-caused incidents.
    Human,
    /// Only naturally caused incidents.
    Natural,
}

impl CausePredicate {
    /// Returns `true` if an incident with the given cause passes this
    /// filter.
    #[must_use]
    pub const fn matches(self, cause: FireCause) -> bool {
        match self {
            Self::Any => true,
            Self::Human => matches!(cause, FireCause::Human),
            Self::Natural => matches!(cause, FireCause::Natural),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Any, Self::Human, Self::Natural]
    }
}
