//! Audio capture abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Supported audio formats for captured buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// WAV container around 16-bit PCM
    Wav { sample_rate: u32 },
    /// Raw 16-bit little-endian PCM
    Pcm { sample_rate: u32, channels: u8 },
}

impl AudioFormat {
    pub fn sample_rate(&self) -> u32 {
        match self {
            Self::Wav { sample_rate } | Self::Pcm { sample_rate, .. } => *sample_rate,
        }
    }
}

/// One captured mono clip as signed 16-bit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAudio {
    pub samples: Vec<i16>,
    pub format: AudioFormat,
}

impl CapturedAudio {
    pub fn pcm(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            format: AudioFormat::Pcm {
                sample_rate,
                channels: 1,
            },
        }
    }

    pub fn duration(&self) -> Duration {
        let rate = self.format.sample_rate().max(1) as f64;
        Duration::from_secs_f64(self.samples.len() as f64 / rate)
    }

    /// Little-endian byte view, as speech services usually expect.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

/// Microphone (or recording) that yields one clip per request.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Capture up to `window` of audio.
    ///
    /// `Ok(None)` means nothing was heard at all; an empty clip is still
    /// `Some` and is analyzed normally.
    async fn capture(&self, window: Duration) -> Result<Option<CapturedAudio>>;
}
