//! Speech-to-Text (STT) trait definition

use crate::capture::CapturedAudio;
use async_trait::async_trait;

/// Why a transcription produced no text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionError {
    /// The recognizer heard audio but could not make out any words.
    #[error("speech was not intelligible")]
    Unintelligible,
    /// The recognition backend failed (network, quota, bad response).
    #[error("speech recognition service error: {0}")]
    Service(String),
    /// No recognizer is configured.
    #[error("speech recognition unavailable")]
    Unavailable,
}

impl TranscriptionError {
    /// Text shown in place of a transcript.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::Unintelligible => "Could not understand audio",
            Self::Service(_) => "Error with speech recognition service",
            Self::Unavailable => "Speech recognition unavailable",
        }
    }
}

/// Speech-to-Text trait for transcribing captured audio to text
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe captured audio to text
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, TranscriptionError>;

    /// Get the name of this STT provider
    fn provider_name(&self) -> &'static str;
}

/// Stand-in used when no recognizer is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranscriber;

#[async_trait]
impl SpeechToText for NoTranscriber {
    async fn transcribe(&self, _audio: &CapturedAudio) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Unavailable)
    }

    fn provider_name(&self) -> &'static str {
        "none"
    }
}
