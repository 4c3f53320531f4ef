//! Study coordinator: one analysis request from capture to persisted session.
//!
//! Wires the limbic layer (window + aggregation), the selector and the session
//! store together. A request that fails to detect anything aborts with
//! `NoSignal`; a request that computes a bundle but cannot write it still
//! returns the bundle and reports the storage failure alongside.

use crate::store::{SessionKey, SessionStore};
use anyhow::Result;
use attune_core::{
    AttuneConfig, AttuneError, FrameClassifier, RecommendationBank, RecommendationBundle,
    SessionRecord, StorageError,
};
use attune_expression::RecommendationSelector;
use attune_limbic::{aggregate, collect_window, WindowStats};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a completed emotion analysis.
#[derive(Debug)]
pub struct EmotionOutcome {
    pub record: SessionRecord,
    pub window: WindowStats,
    /// Where the record was written, or why it could not be.
    pub persisted: std::result::Result<SessionKey, StorageError>,
}

pub struct StudyCoordinator<R = rand::rngs::StdRng> {
    store: SessionStore,
    selector: RecommendationSelector<R>,
}

impl StudyCoordinator {
    /// Build the bank, selector and store described by `config`.
    pub fn from_config(config: &AttuneConfig) -> Result<Self> {
        let bank = Arc::new(config.build_bank()?);
        let selector = match config.recommendations.seed {
            Some(seed) => RecommendationSelector::seeded(bank, seed),
            None => RecommendationSelector::from_entropy(bank),
        };
        Ok(Self::new(
            SessionStore::new(&config.store.sessions_dir),
            selector,
        ))
    }

    /// Builtin bank with a fixed seed; mostly for tests and demos.
    pub fn seeded(store: SessionStore, seed: u64) -> Self {
        let bank = Arc::new(RecommendationBank::builtin());
        Self::new(store, RecommendationSelector::seeded(bank, seed))
    }
}

impl<R: Rng> StudyCoordinator<R> {
    pub fn new(store: SessionStore, selector: RecommendationSelector<R>) -> Self {
        Self { store, selector }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Capture for `window`, summarize, recommend, and persist the session.
    pub async fn analyze_emotion(
        &mut self,
        classifier: &dyn FrameClassifier,
        window: Duration,
    ) -> std::result::Result<EmotionOutcome, AttuneError> {
        let (samples, stats) = collect_window(classifier, window).await?;
        let summary = aggregate(&samples)?;
        tracing::info!(
            "Dominant emotion {} over {} samples",
            summary.dominant,
            summary.sample_count
        );

        let bundle = self.selector.select(summary.dominant.as_str(), None);
        let record = SessionRecord::assemble(summary, bundle);

        let persisted = self.store.persist(&record).await;
        if let Err(e) = &persisted {
            tracing::error!("Session computed but not saved: {}", e);
        }

        Ok(EmotionOutcome {
            record,
            window: stats,
            persisted,
        })
    }

    /// Direct recommendation request, bypassing capture.
    pub fn recommend(&mut self, emotion: &str, stress: Option<&str>) -> RecommendationBundle {
        self.selector.select(emotion, stress)
    }

    /// Most recent sessions, newest first.
    pub async fn history(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<SessionRecord>, StorageError> {
        self.store.list_recent(limit).await
    }
}
