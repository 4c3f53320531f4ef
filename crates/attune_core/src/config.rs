use crate::bank::RecommendationBank;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttuneConfig {
    pub capture: CaptureConfig,
    pub store: StoreConfig,
    pub recommendations: RecommendationConfig,
}

impl AttuneConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AttuneConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from path; if the file doesn't exist, return defaults with env overrides.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            let mut cfg = Self::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }
        Self::load(path)
    }

    /// Build the recommendation bank this config points at.
    pub fn build_bank(&self) -> Result<RecommendationBank> {
        match &self.recommendations.bank_path {
            Some(path) => RecommendationBank::load(path),
            None => Ok(RecommendationBank::builtin()),
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ATTUNE_SESSIONS_DIR") {
            self.store.sessions_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("ATTUNE_HISTORY_LIMIT") {
            if let Ok(n) = v.parse() {
                self.store.history_limit = n;
            }
        }
        if let Ok(v) = std::env::var("ATTUNE_BANK_PATH") {
            self.recommendations.bank_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("ATTUNE_SEED") {
            if let Ok(n) = v.parse() {
                self.recommendations.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("ATTUNE_EMOTION_WINDOW_SECS") {
            if let Ok(n) = v.parse() {
                self.capture.emotion_window_secs = n;
            }
        }
        if let Ok(v) = std::env::var("ATTUNE_VOICE_WINDOW_SECS") {
            if let Ok(n) = v.parse() {
                self.capture.voice_window_secs = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Length of the facial-emotion capture window.
    pub emotion_window_secs: u64,
    /// Length of the voice capture window.
    pub voice_window_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            emotion_window_secs: 5,
            voice_window_secs: 5,
        }
    }
}

impl CaptureConfig {
    pub fn emotion_window(&self) -> Duration {
        Duration::from_secs(self.emotion_window_secs)
    }

    pub fn voice_window(&self) -> Duration {
        Duration::from_secs(self.voice_window_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub sessions_dir: PathBuf,
    /// How many sessions `history` returns when no limit is given.
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from("data/user_sessions"),
            history_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// TOML bank replacing the builtin one.
    pub bank_path: Option<PathBuf>,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

// ============================================================================
// Tests
// ============================================================================
