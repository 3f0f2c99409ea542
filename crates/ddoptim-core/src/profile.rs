//! Buffer profiles: the per-category parameters a buffer-sizing engine reads.
//!
//! A profile groups items that share supply/demand behaviour (manufactured,
//! machined, purchased abroad, ...). This crate never sizes buffers itself;
//! it only stores profiles and answers which lead-time factor applies to a
//! given decoupled lead time (DLT).
//!
//! # Factor selection
//!
//! The three DLT thresholds split the day axis into closed-upper buckets:
//!
//! ```text
//! dlt <= short           -> lead_time_factor_short
//! short < dlt <= medium  -> lead_time_factor_medium
//! dlt > medium           -> lead_time_factor_long
//! ```
//!
//! A DLT exactly on a threshold belongs to the shorter bucket.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors raised when profile parameters violate their contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error(
        "profile '{name}': DLT thresholds must be in ascending order: short({short}) < medium({medium}) < long({long})"
    )]
    ThresholdsNotAscending {
        name: String,
        short: u32,
        medium: u32,
        long: u32,
    },

    #[error("profile '{name}': {factor} factor must be between 0 and 1, got {value}")]
    FactorOutOfRange {
        name: String,
        factor: &'static str,
        value: f64,
    },

    #[error(
        "profile '{name}': lead time factors must be in descending order: short({short}) >= medium({medium}) >= long({long})"
    )]
    FactorsNotDescending {
        name: String,
        short: f64,
        medium: f64,
        long: f64,
    },
}

/// DLT thresholds in days. Must be strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DltThresholds {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
}

/// Lead-time factors per DLT bucket. Each in `(0, 1]`, short >= medium >= long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadTimeFactors {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl LeadTimeFactors {
    /// The factors used by every reference profile: 0.7 / 0.5 / 0.25.
    pub const STANDARD: Self = Self {
        short: 0.7,
        medium: 0.5,
        long: 0.25,
    };
}

/// Immutable buffer-sizing parameters for one item category.
///
/// Validated at construction; deserialization goes through the same checks,
/// so a corrupted record fails exactly like a bad [`BufferProfile::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", into = "ProfileRecord")]
pub struct BufferProfile {
    name: String,
    description: String,
    thresholds: DltThresholds,
    factors: LeadTimeFactors,
    variability_factor: f64,
}

impl BufferProfile {
    /// Build a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when thresholds are not strictly ascending,
    /// when any factor (including `variability_factor`) is outside `(0, 1]`,
    /// or when the lead-time factors are not descending.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        thresholds: DltThresholds,
        factors: LeadTimeFactors,
        variability_factor: f64,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            name: name.into(),
            description: description.into(),
            thresholds,
            factors,
            variability_factor,
        };
        profile.check()?;
        Ok(profile)
    }

    fn check(&self) -> Result<(), ProfileError> {
        let DltThresholds {
            short,
            medium,
            long,
        } = self.thresholds;
        let ascending = short < medium && medium < long;
        if !ascending {
            return Err(ProfileError::ThresholdsNotAscending {
                name: self.name.clone(),
                short,
                medium,
                long,
            });
        }

        for (factor, value) in [
            ("short", self.factors.short),
            ("medium", self.factors.medium),
            ("long", self.factors.long),
            ("variability", self.variability_factor),
        ] {
            if !factor_in_range(value) {
                return Err(ProfileError::FactorOutOfRange {
                    name: self.name.clone(),
                    factor,
                    value,
                });
            }
        }

        let LeadTimeFactors {
            short,
            medium,
            long,
        } = self.factors;
        let descending = short >= medium && medium >= long;
        if !descending {
            return Err(ProfileError::FactorsNotDescending {
                name: self.name.clone(),
                short,
                medium,
                long,
            });
        }

        Ok(())
    }

    /// Pick the lead-time factor for a decoupled lead time in days.
    ///
    /// Total over every input: thresholds are closed upper bounds, and a
    /// negative DLT falls into the short bucket.
    #[must_use]
    pub fn select_lead_time_factor(&self, dlt: f64) -> f64 {
        if dlt <= f64::from(self.thresholds.short) {
            self.factors.short
        } else if dlt <= f64::from(self.thresholds.medium) {
            self.factors.medium
        } else {
            self.factors.long
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn thresholds(&self) -> DltThresholds {
        self.thresholds
    }

    #[must_use]
    pub const fn factors(&self) -> LeadTimeFactors {
        self.factors
    }

    #[must_use]
    pub const fn variability_factor(&self) -> f64 {
        self.variability_factor
    }

    /// Reference profile with short threshold of one day and standard factors.
    /// Only used for the built-in table, whose values are covered by tests.
    fn reference(name: &str, description: &str, medium: u32, long: u32, variability: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            thresholds: DltThresholds {
                short: 1,
                medium,
                long,
            },
            factors: LeadTimeFactors::STANDARD,
            variability_factor: variability,
        }
    }
}

fn factor_in_range(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Flat key-value form of a [`BufferProfile`], as found in network documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dlt_threshold_short: u32,
    pub dlt_threshold_medium: u32,
    pub dlt_threshold_long: u32,
    pub lead_time_factor_short: f64,
    pub lead_time_factor_medium: f64,
    pub lead_time_factor_long: f64,
    pub variability_factor: f64,
}

impl TryFrom<ProfileRecord> for BufferProfile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.name,
            record.description,
            DltThresholds {
                short: record.dlt_threshold_short,
                medium: record.dlt_threshold_medium,
                long: record.dlt_threshold_long,
            },
            LeadTimeFactors {
                short: record.lead_time_factor_short,
                medium: record.lead_time_factor_medium,
                long: record.lead_time_factor_long,
            },
            record.variability_factor,
        )
    }
}

impl From<BufferProfile> for ProfileRecord {
    fn from(profile: BufferProfile) -> Self {
        Self {
            name: profile.name,
            description: profile.description,
            dlt_threshold_short: profile.thresholds.short,
            dlt_threshold_medium: profile.thresholds.medium,
            dlt_threshold_long: profile.thresholds.long,
            lead_time_factor_short: profile.factors.short,
            lead_time_factor_medium: profile.factors.medium,
            lead_time_factor_long: profile.factors.long,
            variability_factor: profile.variability_factor,
        }
    }
}

/// The reference profile table keyed by name: F, I, U, AL and AI.
///
/// - `F`: manufactured finished goods, low variability.
/// - `I`: semi-finished intermediates, low variability.
/// - `U`: machined parts, medium variability and long DLT buckets.
/// - `AL`: purchased from local suppliers, medium variability.
/// - `AI`: purchased internationally, high variability and long DLT buckets.
#[must_use]
pub fn default_profiles() -> BTreeMap<String, BufferProfile> {
    [
        BufferProfile::reference(
            "F",
            "Manufactured finished goods - low variability, predictable demand",
            3,
            7,
            0.25,
        ),
        BufferProfile::reference(
            "I",
            "Intermediates (semi-finished) - low variability, internal control",
            3,
            7,
            0.25,
        ),
        BufferProfile::reference(
            "U",
            "Machined parts - medium variability, capacity constraints",
            5,
            21,
            0.5,
        ),
        BufferProfile::reference(
            "AL",
            "Purchased local - medium variability, generally reliable",
            3,
            7,
            0.5,
        ),
        BufferProfile::reference(
            "AI",
            "Purchased international - high variability, transport delays",
            5,
            21,
            0.7,
        ),
    ]
    .into_iter()
    .map(|profile| (profile.name.clone(), profile))
    .collect()
}
