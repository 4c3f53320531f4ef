//! Temporal emotion aggregation.
//!
//! Reduces the per-frame classifications of one capture window into a single
//! dominant label plus a percentage distribution. Only each frame's top label
//! is tallied; the per-label score mappings are ignored.

use attune_core::{EmotionLabel, EmotionSample, EmotionSummary, NoSignal};
use chrono::Utc;
use std::collections::BTreeMap;

/// Summarize one window of samples.
///
/// Returns [`NoSignal`] for an empty window instead of inventing a neutral
/// result; the caller must treat that as a failed detection.
///
/// Tie-break: when several labels share the highest count, the winner is the
/// label whose running count reached that maximum first while walking the
/// samples in order. `[sad, happy, happy, sad]` therefore yields `happy`.
pub fn aggregate(samples: &[EmotionSample]) -> Result<EmotionSummary, NoSignal> {
    if samples.is_empty() {
        return Err(NoSignal::face());
    }

    let mut counts: BTreeMap<EmotionLabel, usize> = BTreeMap::new();
    for sample in samples {
        *counts.entry(sample.label).or_default() += 1;
    }

    let max = counts.values().copied().max().unwrap_or_default();
    let dominant = first_to_reach(samples, max);

    let total = samples.len() as f64;
    let percentages = counts
        .into_iter()
        .map(|(label, count)| (label, 100.0 * count as f64 / total))
        .collect();

    tracing::debug!(
        "Aggregated {} samples, dominant={} ({} hits)",
        samples.len(),
        dominant,
        max
    );

    Ok(EmotionSummary {
        dominant,
        percentages,
        sample_count: samples.len(),
        summarized_at: Utc::now(),
    })
}

fn first_to_reach(samples: &[EmotionSample], max: usize) -> EmotionLabel {
    let mut running: BTreeMap<EmotionLabel, usize> = BTreeMap::new();
    for sample in samples {
        let count = running.entry(sample.label).or_default();
        *count += 1;
        if *count == max {
            return sample.label;
        }
    }
    // Unreachable for a non-empty slice: some label always reaches the max.
    samples[0].label
}
