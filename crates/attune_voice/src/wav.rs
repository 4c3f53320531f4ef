//! WAV file playback as an [`AudioCapture`].

use crate::capture::{AudioCapture, AudioFormat, CapturedAudio};
use anyhow::{Context, Result};
use async_trait::async_trait;
use hound::WavReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Presents a recorded mono 16-bit WAV file as a microphone capture.
///
/// The whole recording is returned regardless of the requested window.
#[derive(Debug, Clone)]
pub struct WavFileCapture {
    path: PathBuf,
}

impl WavFileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AudioCapture for WavFileCapture {
    async fn capture(&self, _window: Duration) -> Result<Option<CapturedAudio>> {
        let path = self.path.clone();
        let audio = tokio::task::spawn_blocking(move || read_wav(&path))
            .await
            .context("WAV reader task failed")??;
        Ok(Some(audio))
    }
}

/// Read a mono 16-bit PCM WAV file.
pub fn read_wav(path: &Path) -> Result<CapturedAudio> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        anyhow::bail!("WAV must be mono (1ch), got {} ch", spec.channels);
    }
    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        anyhow::bail!(
            "WAV must be 16-bit integer PCM, got {} bits",
            spec.bits_per_sample
        );
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Corrupt WAV data in {}", path.display()))?;

    tracing::debug!(
        "Read {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(CapturedAudio {
        samples,
        format: AudioFormat::Wav {
            sample_rate: spec.sample_rate,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[tokio::test]
    async fn test_reads_mono_16bit() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, 1, &[0, 100, -100, 32767]);

        let audio = WavFileCapture::new(&path)
            .capture(Duration::from_secs(5))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(audio.samples, vec![0, 100, -100, 32767]);
        assert_eq!(audio.format, AudioFormat::Wav { sample_rate: 16_000 });
    }

    #[test]
    fn test_rejects_stereo() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, &[1, 1, 2, 2]);
        let err = read_wav(&path).unwrap_err();
        assert!(err.to_string().contains("mono"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_wav(Path::new("/nonexistent/clip.wav")).is_err());
    }

    #[test]
    fn test_empty_recording_is_still_a_clip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("silence.wav");
        write_wav(&path, 1, &[]);
        assert!(read_wav(&path).unwrap().samples.is_empty());
    }
}
