//! Integration tests for StudyCoordinator
//!
//! Uses tempfile::TempDir for isolated session directories and a scripted
//! classifier standing in for the camera.

use async_trait::async_trait;
use attune_core::{
    AttuneConfig, AttuneError, EmotionLabel, EmotionSample, Frame, FrameClassifier,
    RecommendationBank,
};
use attune_memory::{SessionStore, StudyCoordinator};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;

struct ScriptedClassifier {
    frames: Mutex<VecDeque<Frame>>,
}

impl ScriptedClassifier {
    fn faces(labels: &[EmotionLabel]) -> Self {
        Self::frames(
            labels
                .iter()
                .map(|l| Frame::Detected(EmotionSample::labelled(*l)))
                .collect(),
        )
    }

    fn frames(frames: Vec<Frame>) -> Self {
        Self {
            frames: Mutex::new(frames.into()),
        }
    }
}

#[async_trait]
impl FrameClassifier for ScriptedClassifier {
    async fn next_frame(&self) -> anyhow::Result<Frame> {
        Ok(self.frames.lock().await.pop_front().unwrap_or(Frame::Ended))
    }
}

struct UnpluggedCamera;

#[async_trait]
impl FrameClassifier for UnpluggedCamera {
    async fn next_frame(&self) -> anyhow::Result<Frame> {
        anyhow::bail!("no video device")
    }
}

const WINDOW: Duration = Duration::from_secs(5);

/// Test 1: happy, happy, sad → happy session with a full bundle, persisted
#[tokio::test]
async fn test_end_to_end_happy_window() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut coord = StudyCoordinator::seeded(SessionStore::new(dir.path()), 11);
    let classifier = ScriptedClassifier::faces(&[
        EmotionLabel::Happy,
        EmotionLabel::Happy,
        EmotionLabel::Sad,
    ]);

    let outcome = coord.analyze_emotion(&classifier, WINDOW).await.unwrap();
    let summary = &outcome.record.emotion_analysis;
    assert_eq!(summary.dominant, EmotionLabel::Happy);
    assert_eq!(summary.sample_count, 3);
    assert!((summary.percentage(EmotionLabel::Happy) - 66.67).abs() < 0.01);
    assert!((summary.percentage(EmotionLabel::Sad) - 33.33).abs() < 0.01);

    let bundle = &outcome.record.recommendations;
    let happy = RecommendationBank::builtin().entry(EmotionLabel::Happy).clone();
    assert_eq!(bundle.emotion, "happy");
    assert_eq!(bundle.study_tips.len(), 2);
    assert_eq!(bundle.recommended_activities.len(), 3);
    assert!(bundle.study_tips.iter().all(|t| happy.study_tips.contains(t)));
    assert!(bundle
        .recommended_activities
        .iter()
        .all(|a| happy.activities.contains(a)));

    assert!(outcome.persisted.is_ok());
    let history = coord.history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], outcome.record);
}

/// Test 2: a window without any face is NoSignal, never a neutral default
#[tokio::test]
async fn test_faceless_window_is_no_signal() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut coord = StudyCoordinator::seeded(SessionStore::new(dir.path()), 1);
    let classifier = ScriptedClassifier::frames(vec![Frame::NoFace, Frame::NoFace]);

    let err = coord.analyze_emotion(&classifier, WINDOW).await.unwrap_err();
    assert!(err.is_no_signal());
    // Nothing is written for a failed detection
    assert!(coord.history(10).await.unwrap().is_empty());
}

/// Test 3: storage failure does not hide the computed bundle
#[tokio::test]
async fn test_storage_failure_is_reported_separately() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "occupied").unwrap();

    let mut coord = StudyCoordinator::seeded(SessionStore::new(blocker.join("sessions")), 2);
    let classifier = ScriptedClassifier::faces(&[EmotionLabel::Angry]);

    let outcome = coord.analyze_emotion(&classifier, WINDOW).await.unwrap();
    assert_eq!(outcome.record.emotion_analysis.dominant, EmotionLabel::Angry);
    assert_eq!(outcome.record.recommendations.study_tips.len(), 2);
    assert!(outcome.persisted.is_err());
}

/// Test 4: a broken camera surfaces as a capture error
#[tokio::test]
async fn test_capture_error_propagates() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut coord = StudyCoordinator::seeded(SessionStore::new(dir.path()), 3);

    let err = coord.analyze_emotion(&UnpluggedCamera, WINDOW).await.unwrap_err();
    assert!(matches!(err, AttuneError::Capture(_)));
    assert!(err.to_string().contains("no video device"));
}

/// Test 5: direct recommendations use the same fallback rules
#[tokio::test]
async fn test_direct_recommendation() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut coord = StudyCoordinator::seeded(SessionStore::new(dir.path()), 4);

    let bundle = coord.recommend("klingon", Some("High"));
    assert_eq!(bundle.emotion, "klingon");
    assert_eq!(bundle.study_tips.len(), 5);

    // Direct requests are not persisted
    assert!(coord.history(10).await.unwrap().is_empty());
}

/// Test 6: coordinator built from config honours the seed and sessions dir
#[tokio::test]
async fn test_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = AttuneConfig::default();
    config.store.sessions_dir = dir.path().join("sessions");
    config.recommendations.seed = Some(99);

    let mut a = StudyCoordinator::from_config(&config).unwrap();
    let mut b = StudyCoordinator::from_config(&config).unwrap();
    assert_eq!(a.store().dir(), dir.path().join("sessions"));
    assert_eq!(
        a.recommend("fear", None).study_tips,
        b.recommend("fear", None).study_tips
    );
}
