//! The emotion-indexed recommendation bank.
//!
//! Built once at startup, either from the curated builtin tables or from a
//! TOML file of the same shape, and shared read-only afterwards.
//!
//! ```toml
//! [emotions.happy]
//! study_tips = ["..."]
//! motivational_quotes = ["..."]
//! activities = ["..."]
//!
//! [stress_tips]
//! High = ["..."]
//! ```

use crate::emotion::EmotionLabel;
use crate::stress::StressLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Candidate content for one emotion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankEntry {
    pub study_tips: Vec<String>,
    pub motivational_quotes: Vec<String>,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    #[error("recommendation bank has no entry for '{0}'")]
    MissingEmotion(EmotionLabel),
    #[error("recommendation bank entry '{0}' has no motivational quotes")]
    NoQuotes(EmotionLabel),
    #[error("recommendation bank names '{0}' more than once")]
    DuplicateEmotion(EmotionLabel),
    #[error("recommendation bank names unknown emotion {0:?}")]
    UnknownEmotion(String),
    #[error("unknown stress level key {0:?} (expected High, Medium or Low)")]
    UnknownStressLevel(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBank {
    emotions: BTreeMap<String, BankEntry>,
    stress_tips: BTreeMap<String, Vec<String>>,
}

/// Immutable emotion → content table plus the stress-level tip lists.
///
/// Every one of the seven labels has an entry and every entry has at least
/// one motivational quote; both are checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationBank {
    // Indexed by position in `EmotionLabel::ALL`.
    entries: Vec<BankEntry>,
    // Indexed by position in `StressLevel::ALL`.
    stress_tips: Vec<Vec<String>>,
}

impl RecommendationBank {
    /// The curated bank shipped with attune.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(_, e)| BankEntry {
                study_tips: to_owned(e.study_tips),
                motivational_quotes: to_owned(e.motivational_quotes),
                activities: to_owned(e.activities),
            })
            .collect();
        let stress_tips = BUILTIN_STRESS_TIPS
            .iter()
            .map(|(_, tips)| to_owned(tips))
            .collect();
        Self {
            entries,
            stress_tips,
        }
    }

    /// Load a bank from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read recommendation bank: {}",
                path.as_ref().display()
            )
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid recommendation bank: {}", path.as_ref().display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawBank = toml::from_str(content).context("Failed to parse bank TOML")?;
        Ok(Self::from_raw(raw)?)
    }

    fn from_raw(raw: RawBank) -> std::result::Result<Self, BankError> {
        let mut by_label: BTreeMap<EmotionLabel, BankEntry> = BTreeMap::new();
        for (name, entry) in raw.emotions {
            let label = EmotionLabel::parse_loose(&name)
                .ok_or_else(|| BankError::UnknownEmotion(name.clone()))?;
            if by_label.insert(label, entry).is_some() {
                return Err(BankError::DuplicateEmotion(label));
            }
        }

        let mut entries = Vec::with_capacity(EmotionLabel::ALL.len());
        for label in EmotionLabel::ALL {
            let entry = by_label
                .remove(&label)
                .ok_or(BankError::MissingEmotion(label))?;
            if entry.motivational_quotes.is_empty() {
                return Err(BankError::NoQuotes(label));
            }
            entries.push(entry);
        }

        let mut by_level: BTreeMap<StressLevel, Vec<String>> = BTreeMap::new();
        for (key, tips) in raw.stress_tips {
            let level = StressLevel::from_key(&key)
                .ok_or_else(|| BankError::UnknownStressLevel(key.clone()))?;
            by_level.insert(level, tips);
        }
        let stress_tips = StressLevel::ALL
            .iter()
            .map(|level| by_level.remove(level).unwrap_or_default())
            .collect();

        Ok(Self {
            entries,
            stress_tips,
        })
    }

    pub fn entry(&self, label: EmotionLabel) -> &BankEntry {
        &self.entries[label_index(label)]
    }

    /// Extra tips for a stress level; empty when the bank defines none.
    pub fn stress_tips(&self, level: StressLevel) -> &[String] {
        &self.stress_tips[level_index(level)]
    }
}

impl Default for RecommendationBank {
    fn default() -> Self {
        Self::builtin()
    }
}

fn label_index(label: EmotionLabel) -> usize {
    EmotionLabel::ALL
        .iter()
        .position(|l| *l == label)
        .unwrap_or_default()
}

fn level_index(level: StressLevel) -> usize {
    StressLevel::ALL
        .iter()
        .position(|l| *l == level)
        .unwrap_or_default()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct BuiltinEntry {
    study_tips: &'static [&'static str],
    motivational_quotes: &'static [&'static str],
    activities: &'static [&'static str],
}

// Same order as `EmotionLabel::ALL`.
const BUILTIN: [(EmotionLabel, BuiltinEntry); 7] = [
    (
        EmotionLabel::Happy,
        BuiltinEntry {
            study_tips: &[
                "Great mood for learning! Try tackling challenging topics now.",
                "Your positive energy is perfect for group study sessions.",
                "Consider teaching others - you'll retain information better.",
                "This is an excellent time for creative problem-solving exercises.",
            ],
            motivational_quotes: &[
                "Success is not the key to happiness. Happiness is the key to success!",
                "Your positive energy is contagious - keep it up!",
                "Learning with joy makes knowledge stick better.",
                "You're in the perfect mindset for growth!",
            ],
            activities: &[
                "Start a challenging new topic",
                "Engage in collaborative learning",
                "Create mind maps or visual aids",
                "Practice active recall techniques",
            ],
        },
    ),
    (
        EmotionLabel::Sad,
        BuiltinEntry {
            study_tips: &[
                "Start with easier topics to build confidence gradually.",
                "Take frequent breaks and practice self-compassion.",
                "Use gentle study methods like reading or listening to lectures.",
                "Focus on review rather than learning new complex concepts.",
            ],
            motivational_quotes: &[
                "Every expert was once a beginner. You're on your journey.",
                "It's okay to have difficult days. Progress isn't always linear.",
                "Small steps forward are still steps forward.",
                "Your feelings are valid, and so is your potential.",
            ],
            activities: &[
                "Review familiar material",
                "Listen to educational podcasts",
                "Do light reading",
                "Practice mindfulness before studying",
            ],
        },
    ),
    (
        EmotionLabel::Angry,
        BuiltinEntry {
            study_tips: &[
                "Channel your energy into focused study sessions.",
                "Take deep breaths before starting difficult topics.",
                "Use physical activity as a study break.",
                "Practice problem-solving to redirect your intensity.",
            ],
            motivational_quotes: &[
                "Turn your anger into determination for success.",
                "Strong emotions can fuel strong achievements.",
                "Channel this energy into breakthrough moments.",
                "Your intensity can be your greatest asset.",
            ],
            activities: &[
                "Solve challenging problems",
                "Do intensive review sessions",
                "Practice with time constraints",
                "Take active breaks between study sessions",
            ],
        },
    ),
    (
        EmotionLabel::Neutral,
        BuiltinEntry {
            study_tips: &[
                "Perfect state for consistent, steady learning.",
                "Ideal time for routine study tasks and review.",
                "Good moment to establish study habits.",
                "Focus on systematic learning approaches.",
            ],
            motivational_quotes: &[
                "Consistency is the key to mastery.",
                "Steady progress builds lasting knowledge.",
                "Your calm focus is a powerful learning tool.",
                "Balance leads to sustainable success.",
            ],
            activities: &[
                "Follow your regular study routine",
                "Work through practice problems",
                "Organize your study materials",
                "Plan your learning schedule",
            ],
        },
    ),
    (
        EmotionLabel::Fear,
        BuiltinEntry {
            study_tips: &[
                "Start with familiar topics to build confidence.",
                "Break large tasks into smaller, manageable pieces.",
                "Use positive self-talk and affirmations.",
                "Study with others for support and encouragement.",
            ],
            motivational_quotes: &[
                "Courage is not the absence of fear, but action in spite of it.",
                "Every challenge is an opportunity to grow stronger.",
                "You are more capable than you realize.",
                "Fear is temporary, but knowledge lasts forever.",
            ],
            activities: &[
                "Review basics and fundamentals",
                "Study in a comfortable environment",
                "Use visualization techniques",
                "Practice relaxation exercises",
            ],
        },
    ),
    (
        EmotionLabel::Surprise,
        BuiltinEntry {
            study_tips: &[
                "Use this heightened awareness for active learning.",
                "Great time for exploring new topics or methods.",
                "Channel curiosity into deep learning.",
                "Try interactive or hands-on learning approaches.",
            ],
            motivational_quotes: &[
                "Curiosity is the engine of achievement.",
                "Embrace the unexpected - it leads to discovery.",
                "Your openness to new ideas is a strength.",
                "Surprise moments often lead to breakthrough understanding.",
            ],
            activities: &[
                "Explore new learning resources",
                "Try different study methods",
                "Engage with interactive content",
                "Ask questions and seek deeper understanding",
            ],
        },
    ),
    (
        EmotionLabel::Disgust,
        BuiltinEntry {
            study_tips: &[
                "Find ways to make the material more interesting or relevant.",
                "Connect topics to your personal interests or goals.",
                "Take breaks and return with a fresh perspective.",
                "Use different learning formats (videos, podcasts, games).",
            ],
            motivational_quotes: &[
                "Sometimes the subjects we resist teach us the most.",
                "Growth happens outside your comfort zone.",
                "Every topic has value - find the connection that matters to you.",
                "Push through resistance to discover hidden insights.",
            ],
            activities: &[
                "Find real-world applications of the topic",
                "Use multimedia learning resources",
                "Study with others who enjoy the subject",
                "Reward yourself for completing difficult sections",
            ],
        },
    ),
];

// Same order as `StressLevel::ALL`.
const BUILTIN_STRESS_TIPS: [(StressLevel, &[&str]); 3] = [
    (
        StressLevel::Low,
        &[
            "You're in a great state for focused learning!",
            "Consider extending your study sessions slightly.",
            "This is a good time for challenging material.",
        ],
    ),
    (
        StressLevel::Medium,
        &[
            "Maintain regular break intervals.",
            "Stay hydrated and take brief walks between sessions.",
            "Use background music if it helps you focus.",
        ],
    ),
    (
        StressLevel::High,
        &[
            "Take 5-minute breathing breaks every 25 minutes.",
            "Consider shorter study sessions with more frequent breaks.",
            "Practice progressive muscle relaxation before studying.",
        ],
    ),
];
