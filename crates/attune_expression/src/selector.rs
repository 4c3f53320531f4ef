//! Recommendation selection.
//!
//! Samples a small, varied bundle from the bank entry for an emotion and
//! optionally appends the tips for a stress level. The generator is owned by
//! the selector so a seeded one reproduces the exact same bundles.

use attune_core::{EmotionLabel, RecommendationBank, RecommendationBundle, StressLevel};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Base study tips drawn per bundle.
pub const BASE_TIPS: usize = 2;
/// Activities drawn per bundle.
pub const ACTIVITIES: usize = 3;
/// Upper bound on stress-conditioned tips appended to a bundle.
pub const MAX_STRESS_TIPS: usize = 3;

pub struct RecommendationSelector<R = StdRng> {
    bank: Arc<RecommendationBank>,
    rng: R,
}

impl RecommendationSelector<StdRng> {
    /// Selector seeded from OS entropy.
    pub fn from_entropy(bank: Arc<RecommendationBank>) -> Self {
        Self::with_rng(bank, StdRng::from_entropy())
    }

    /// Selector whose output is fully determined by `seed`.
    pub fn seeded(bank: Arc<RecommendationBank>, seed: u64) -> Self {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RecommendationSelector<R> {
    pub fn with_rng(bank: Arc<RecommendationBank>, rng: R) -> Self {
        Self { bank, rng }
    }

    pub fn bank(&self) -> &RecommendationBank {
        &self.bank
    }

    /// Build a bundle for a free-form emotion string and stress key.
    ///
    /// Unknown emotions fall back to `neutral`; a stress key other than
    /// `"High"`, `"Medium"` or `"Low"` adds no tips. Neither is an error.
    pub fn select(&mut self, emotion: &str, stress: Option<&str>) -> RecommendationBundle {
        let level = stress.and_then(|key| {
            let level = StressLevel::from_key(key);
            if level.is_none() {
                tracing::debug!("Ignoring unrecognized stress level {:?}", key);
            }
            level
        });
        self.select_with_level(emotion, level)
    }

    pub fn select_with_level(
        &mut self,
        emotion: &str,
        stress: Option<StressLevel>,
    ) -> RecommendationBundle {
        let label = EmotionLabel::parse_loose(emotion).unwrap_or_else(|| {
            tracing::debug!("Unrecognized emotion {:?}, using neutral", emotion);
            EmotionLabel::Neutral
        });
        let entry = self.bank.entry(label);

        let mut study_tips = sample(&entry.study_tips, BASE_TIPS, &mut self.rng);
        let motivational_quote = sample(&entry.motivational_quotes, 1, &mut self.rng)
            .pop()
            .unwrap_or_default();
        let recommended_activities = sample(&entry.activities, ACTIVITIES, &mut self.rng);

        if let Some(level) = stress {
            study_tips.extend(
                self.bank
                    .stress_tips(level)
                    .iter()
                    .take(MAX_STRESS_TIPS)
                    .cloned(),
            );
        }

        RecommendationBundle {
            emotion: emotion.to_string(),
            study_tips,
            motivational_quote,
            recommended_activities,
            generated_at: Utc::now(),
        }
    }
}

/// Up to `amount` distinct items, without replacement.
fn sample<R: Rng>(items: &[String], amount: usize, rng: &mut R) -> Vec<String> {
    items.choose_multiple(rng, amount).cloned().collect()
}
