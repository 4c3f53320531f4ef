//! Coarse vocal stress classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued stress level. Serialized as `"Low"`, `"Medium"`, `"High"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Medium, StressLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Exact-match lookup on `"High"`, `"Medium"`, `"Low"`.
    ///
    /// Any other spelling (including other casings) yields `None`; callers
    /// treat that as "no stress adjustment", never as an error.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == key)
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the stress estimator over one audio buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressEstimate {
    pub level: StressLevel,
    /// Sum of squared samples (not RMS).
    pub raw_energy: f64,
    pub raw_zero_crossings: u64,
    pub estimated_at: DateTime<Utc>,
}
