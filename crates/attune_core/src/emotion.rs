//! Discrete facial-emotion labels and the per-window summary built from them.
//!
//! The classifier behind the camera speaks in seven basic labels. A single
//! frame yields one [`EmotionSample`]; a capture window is reduced into one
//! [`EmotionSummary`] by the temporal aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The seven labels the frame classifier can emit.
///
/// Declaration order is the canonical order used for map keys and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Neutral,
    Fear,
    Surprise,
    Disgust,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Neutral,
        EmotionLabel::Fear,
        EmotionLabel::Surprise,
        EmotionLabel::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Neutral => "neutral",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the seven labels.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();
        Self::ALL.into_iter().find(|l| l.as_str() == lower)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a classifier hands back a label outside the known seven.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion label: {0:?}")]
pub struct UnknownEmotion(pub String);

impl FromStr for EmotionLabel {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// One frame's classification.
///
/// `scores` is whatever the classifier reported per label; it is carried for
/// inspection but aggregation only looks at `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    pub label: EmotionLabel,
    #[serde(default)]
    pub scores: BTreeMap<EmotionLabel, f64>,
    pub captured_at: DateTime<Utc>,
}

impl EmotionSample {
    pub fn new(label: EmotionLabel, scores: BTreeMap<EmotionLabel, f64>) -> Self {
        Self {
            label,
            scores,
            captured_at: Utc::now(),
        }
    }

    /// A sample with no score mapping, stamped now.
    pub fn labelled(label: EmotionLabel) -> Self {
        Self::new(label, BTreeMap::new())
    }
}

/// Consolidated emotion over one capture window.
///
/// `percentages` holds one entry per label that occurred at least once and
/// sums to 100. A summary is never built from zero samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    pub dominant: EmotionLabel,
    pub percentages: BTreeMap<EmotionLabel, f64>,
    pub sample_count: usize,
    pub summarized_at: DateTime<Utc>,
}

impl EmotionSummary {
    pub fn percentage(&self, label: EmotionLabel) -> f64 {
        self.percentages.get(&label).copied().unwrap_or(0.0)
    }
}
