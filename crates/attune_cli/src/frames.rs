//! Replays pre-classified frames from a JSON Lines file.
//!
//! Each non-blank line is one frame: `{"label": "happy", "scores": {...}}` for a
//! detected face, `{"label": null}` (or `{}`) for a frame without one. Once the
//! file is exhausted the source reports `Ended`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use attune_core::{EmotionLabel, EmotionSample, Frame, FrameClassifier};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use tokio::sync::Mutex;

#[derive(Debug, Deserialize)]
struct FrameLine {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    scores: BTreeMap<String, f64>,
    #[serde(default)]
    captured_at: Option<DateTime<Utc>>,
}

impl FrameLine {
    fn into_frame(self, line_no: usize) -> Frame {
        let Some(raw) = self.label else {
            return Frame::NoFace;
        };
        let Some(label) = EmotionLabel::parse_loose(&raw) else {
            tracing::warn!("Line {}: unknown emotion label {:?}, treating as no face", line_no, raw);
            return Frame::NoFace;
        };

        let scores = self
            .scores
            .into_iter()
            .filter_map(|(k, v)| EmotionLabel::parse_loose(&k).map(|l| (l, v)))
            .collect();
        let mut sample = EmotionSample::new(label, scores);
        if let Some(at) = self.captured_at {
            sample.captured_at = at;
        }
        Frame::Detected(sample)
    }
}

pub struct JsonlFrames {
    frames: Mutex<VecDeque<Frame>>,
}

impl JsonlFrames {
    pub async fn open(path: &Path) -> Result<Self> {
        let body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read frames file: {}", path.display()))?;
        Self::parse(&body)
    }

    pub fn parse(body: &str) -> Result<Self> {
        let mut frames = VecDeque::new();
        for (idx, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let raw: FrameLine = serde_json::from_str(line)
                .with_context(|| format!("Malformed frame on line {}", idx + 1))?;
            frames.push_back(raw.into_frame(idx + 1));
        }
        tracing::debug!("Loaded {} frames", frames.len());
        Ok(Self {
            frames: Mutex::new(frames),
        })
    }
}

#[async_trait]
impl FrameClassifier for JsonlFrames {
    async fn next_frame(&self) -> Result<Frame> {
        Ok(self.frames.lock().await.pop_front().unwrap_or(Frame::Ended))
    }
}
