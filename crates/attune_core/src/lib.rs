pub mod bank;
pub mod config;
pub mod emotion;
pub mod error;
pub mod recommendation;
pub mod session;
pub mod stress;

pub use bank::{BankEntry, BankError, RecommendationBank};
pub use config::AttuneConfig;
pub use emotion::{EmotionLabel, EmotionSample, EmotionSummary, UnknownEmotion};
pub use error::{AttuneError, NoSignal, SignalSource, StorageError};
pub use recommendation::RecommendationBundle;
pub use session::SessionRecord;
pub use stress::{StressEstimate, StressLevel};

use async_trait::async_trait;

/// What the classifier made of one captured frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Detected(EmotionSample),
    /// A frame was read but no face was found in it.
    NoFace,
    /// The frame source is exhausted (device closed, end of recording).
    Ended,
}

/// Camera + per-frame emotion classifier.
///
/// Implementations own the capture device; attune only polls them.
#[async_trait]
pub trait FrameClassifier: Send + Sync {
    async fn next_frame(&self) -> anyhow::Result<Frame>;
}
