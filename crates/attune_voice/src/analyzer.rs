//! Voice tone analysis: capture, best-effort transcription, stress estimate.

use crate::capture::AudioCapture;
use crate::stt::SpeechToText;
use attune_core::{AttuneError, NoSignal, StressEstimate, StressLevel};
use attune_limbic::StressEstimator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Result of one voice analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    /// Transcript, or a fixed fallback phrase when recognition failed.
    pub text: String,
    pub energy_level: f64,
    pub zero_crossing_rate: u64,
    pub estimated_stress: StressLevel,
    pub timestamp: DateTime<Utc>,
}

impl VoiceAnalysis {
    pub fn new(text: String, estimate: StressEstimate) -> Self {
        Self {
            text,
            energy_level: estimate.raw_energy,
            zero_crossing_rate: estimate.raw_zero_crossings,
            estimated_stress: estimate.level,
            timestamp: estimate.estimated_at,
        }
    }
}

pub struct VoiceAnalyzer {
    capture: Arc<dyn AudioCapture>,
    stt: Arc<dyn SpeechToText>,
    estimator: StressEstimator,
}

impl VoiceAnalyzer {
    pub fn new(capture: Arc<dyn AudioCapture>, stt: Arc<dyn SpeechToText>) -> Self {
        Self {
            capture,
            stt,
            estimator: StressEstimator::new(),
        }
    }

    /// Capture up to `window` of audio and analyze it.
    ///
    /// Fails only when nothing was captured or the device errored; a failed
    /// transcription degrades to a fallback text.
    pub async fn analyze(&self, window: Duration) -> Result<VoiceAnalysis, AttuneError> {
        let audio = self
            .capture
            .capture(window)
            .await?
            .ok_or_else(NoSignal::voice)?;

        let text = match self.stt.transcribe(&audio).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Transcription via {} failed: {}", self.stt.provider_name(), e);
                e.fallback_text().to_string()
            }
        };

        let estimate = self.estimator.estimate(&audio.samples);
        tracing::info!(
            "Voice analyzed: {:.1}s of audio, stress {}",
            audio.duration().as_secs_f64(),
            estimate.level
        );
        Ok(VoiceAnalysis::new(text, estimate))
    }
}
