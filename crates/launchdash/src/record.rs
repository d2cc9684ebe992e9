//! Launch record types.
//!
//! A launch record is one row of historical data: where the launch happened,
//! whether it succeeded, how heavy the payload was, and which booster family
//! flew it.

use serde::{Deserialize, Serialize};

/// Sentinel value that selects every launch site.
pub const ALL_SITES: &str = "ALL";

/// The outcome of a launch.
///
/// Serialized as the integer flag used by the source data (`1` or `0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// The launch failed (`0`).
    Failure,
    /// The launch succeeded (`1`).
    Success,
}

impl Outcome {
    /// The numeric flag for this outcome.
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Build an outcome from its numeric flag.
    #[must_use]
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Failure),
            1 => Some(Self::Success),
            _ => None,
        }
    }

    /// Parse an outcome cell. Accepts `0`/`1` and their float spellings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(flag) = raw.parse::<u8>() {
            return Self::from_flag(flag);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.abs() < f64::EPSILON => Some(Self::Failure),
            Ok(v) if (v - 1.0).abs() < f64::EPSILON => Some(Self::Success),
            _ => None,
        }
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag())
    }
}

impl Serialize for Outcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.flag())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flag = u8::deserialize(deserializer)?;
        Self::from_flag(flag)
            .ok_or_else(|| serde::de::Error::custom(format!("outcome must be 0 or 1, got {flag}")))
    }
}

/// One historical launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch site name.
    pub site: String,
    /// Whether the launch succeeded.
    pub outcome: Outcome,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Booster family, used for chart coloring.
    pub booster_category: String,
}

impl LaunchRecord {
    /// Create a new launch record.
    #[must_use]
    pub fn new(
        site: impl Into<String>,
        outcome: Outcome,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            outcome,
            payload_mass_kg,
            booster_category: booster_category.into(),
        }
    }

    /// Check the record invariants, returning a description of the first
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns a message if the site is empty or the payload is negative or
    /// not finite.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.site.trim().is_empty() {
            return Err("launch site is empty".to_string());
        }
        if !self.payload_mass_kg.is_finite() {
            return Err(format!(
                "payload mass must be finite, got {}",
                self.payload_mass_kg
            ));
        }
        if self.payload_mass_kg < 0.0 {
            return Err(format!(
                "payload mass must be non-negative, got {}",
                self.payload_mass_kg
            ));
        }
        Ok(())
    }
}

/// The launch site chosen in the dashboard dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    /// Every site (the `ALL` sentinel).
    #[default]
    All,
    /// One concrete site name. Unknown names are allowed and match nothing.
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    /// Whether a record's site passes this selection.
    #[must_use]
    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(selected) => selected == site,
        }
    }

    /// The dropdown value for this selection.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site,
        }
    }
}

impl std::fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// A closed payload-mass interval `[low, high]` in kilograms.
///
/// `low > high` is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

impl PayloadRange {
    /// Create a new range.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether the mass falls inside the closed interval.
    #[must_use]
    pub fn contains(&self, mass_kg: f64) -> bool {
        mass_kg >= self.low && mass_kg <= self.high
    }
}
