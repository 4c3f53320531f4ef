//! Time-bounded collection of per-frame classifications.

use anyhow::Result;
use attune_core::{EmotionSample, Frame, FrameClassifier};
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// Counters describing how a window was filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub frames: usize,
    pub faceless: usize,
    /// The classifier reported end-of-stream before the window elapsed.
    pub ended_early: bool,
}

/// Poll `classifier` until `window` has elapsed or it reports [`Frame::Ended`].
///
/// Samples come back in arrival order. Frames without a face are skipped,
/// never turned into samples. A frame still pending when the deadline passes
/// is abandoned.
pub async fn collect_window(
    classifier: &dyn FrameClassifier,
    window: Duration,
) -> Result<(Vec<EmotionSample>, WindowStats)> {
    let deadline = Instant::now() + window;
    let mut samples = Vec::new();
    let mut stats = WindowStats::default();

    while Instant::now() < deadline {
        let frame = match timeout_at(deadline, classifier.next_frame()).await {
            Ok(frame) => frame?,
            Err(_) => break,
        };
        match frame {
            Frame::Detected(sample) => {
                stats.frames += 1;
                tracing::debug!("Frame {}: {}", stats.frames, sample.label);
                samples.push(sample);
            }
            Frame::NoFace => {
                stats.frames += 1;
                stats.faceless += 1;
            }
            Frame::Ended => {
                stats.ended_early = true;
                break;
            }
        }
    }

    tracing::info!(
        "Capture window closed: {} samples from {} frames ({} without a face)",
        samples.len(),
        stats.frames,
        stats.faceless
    );

    Ok((samples, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attune_core::EmotionLabel;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    /// Replays a fixed script of frames, pausing `gap` before each one.
    struct ScriptedClassifier {
        frames: Mutex<VecDeque<Frame>>,
        gap: Duration,
    }

    impl ScriptedClassifier {
        fn new(frames: Vec<Frame>, gap: Duration) -> Self {
            Self {
                frames: Mutex::new(frames.into()),
                gap,
            }
        }
    }

    #[async_trait]
    impl FrameClassifier for ScriptedClassifier {
        async fn next_frame(&self) -> Result<Frame> {
            tokio::time::sleep(self.gap).await;
            Ok(self.frames.lock().await.pop_front().unwrap_or(Frame::Ended))
        }
    }

    struct BrokenCamera;

    #[async_trait]
    impl FrameClassifier for BrokenCamera {
        async fn next_frame(&self) -> Result<Frame> {
            anyhow::bail!("camera unplugged")
        }
    }

    fn detected(label: EmotionLabel) -> Frame {
        Frame::Detected(EmotionSample::labelled(label))
    }

    #[tokio::test(start_paused = true)]
    async fn test_collects_in_order_until_stream_ends() {
        let classifier = ScriptedClassifier::new(
            vec![
                detected(EmotionLabel::Sad),
                Frame::NoFace,
                detected(EmotionLabel::Happy),
            ],
            Duration::from_millis(10),
        );
        let (samples, stats) = collect_window(&classifier, Duration::from_secs(5))
            .await
            .unwrap();
        let labels: Vec<_> = samples.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![EmotionLabel::Sad, EmotionLabel::Happy]);
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.faceless, 1);
        assert!(stats.ended_early);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_deadline_stops_collection() {
        let frames = (0..100).map(|_| detected(EmotionLabel::Neutral)).collect();
        // One frame per second, two-and-a-half second window
        let classifier = ScriptedClassifier::new(frames, Duration::from_secs(1));
        let (samples, stats) = collect_window(&classifier, Duration::from_millis(2500))
            .await
            .unwrap();
        assert_eq!(samples.len(), 2);
        assert!(!stats.ended_early);
    }

    #[tokio::test(start_paused = true)]
    async fn test_faceless_window_yields_no_samples() {
        let classifier = ScriptedClassifier::new(
            vec![Frame::NoFace, Frame::NoFace],
            Duration::from_millis(1),
        );
        let (samples, stats) = collect_window(&classifier, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(samples.is_empty());
        assert_eq!(stats.faceless, 2);
    }

    #[tokio::test]
    async fn test_classifier_error_propagates() {
        let err = collect_window(&BrokenCamera, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("camera unplugged"));
    }
}
