//! Voice module for attune
//!
//! Provides audio capture and Speech-to-Text (STT) abstractions plus the
//! voice analyzer that turns a captured clip into a stress estimate.
//! Concrete device and recognizer implementations live outside this crate;
//! only WAV file playback is built in.

mod analyzer;
mod capture;
mod stt;
mod wav;

pub use analyzer::{VoiceAnalysis, VoiceAnalyzer};
pub use capture::{AudioCapture, AudioFormat, CapturedAudio};
pub use stt::{NoTranscriber, SpeechToText, TranscriptionError};
pub use wav::{read_wav, WavFileCapture};
