//! Error taxonomy shared across attune crates.
//!
//! Two things are not errors: an unrecognized emotion label
//! (coerced to `neutral` by the selector) and an unrecognized stress key
//! (contributes no extra tips). Everything here surfaces to the caller.

use std::fmt;
use std::path::PathBuf;

/// Which capture path produced nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Face,
    Voice,
}

impl fmt::Display for SignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Face => f.write_str("face"),
            Self::Voice => f.write_str("voice"),
        }
    }
}

/// Nothing was detected in a capture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no {channel} signal detected")]
pub struct NoSignal {
    pub channel: SignalSource,
}

impl NoSignal {
    pub fn face() -> Self {
        Self {
            channel: SignalSource::Face,
        }
    }

    pub fn voice() -> Self {
        Self {
            channel: SignalSource::Voice,
        }
    }
}

/// Session store read/write failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttuneError {
    #[error(transparent)]
    NoSignal(#[from] NoSignal),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A capture collaborator (camera, microphone, file) failed outright.
    #[error(transparent)]
    Capture(#[from] anyhow::Error),
}

impl AttuneError {
    pub fn is_no_signal(&self) -> bool {
        matches!(self, Self::NoSignal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_messages() {
        assert_eq!(NoSignal::face().to_string(), "no face signal detected");
        assert_eq!(NoSignal::voice().to_string(), "no voice signal detected");
    }

    #[test]
    fn test_no_signal_converts_transparently() {
        let err: AttuneError = NoSignal::face().into();
        assert!(err.is_no_signal());
        assert_eq!(err.to_string(), "no face signal detected");
    }

    #[test]
    fn test_storage_error_names_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io("write", "/data/session_x.json", io);
        let msg = err.to_string();
        assert!(msg.contains("write"));
        assert!(msg.contains("/data/session_x.json"));
        assert!(!AttuneError::from(err).is_no_signal());
    }
}
