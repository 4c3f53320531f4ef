use anyhow::{Context, Result};
use attune_core::{AttuneConfig, AttuneError};
use attune_memory::{SessionStore, StudyCoordinator};
use attune_voice::{NoTranscriber, VoiceAnalyzer, WavFileCapture};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod frames;

use frames::JsonlFrames;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "attune.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a window of classified frames, recommend, and save the session
    Analyze {
        /// JSON Lines file of classified frames
        #[arg(long)]
        frames: PathBuf,

        /// Capture window in seconds (defaults to the configured window)
        #[arg(long)]
        window_secs: Option<u64>,
    },
    /// Estimate stress from a mono 16-bit WAV recording
    Voice {
        #[arg(long)]
        wav: PathBuf,

        /// Also recommend for this emotion, conditioned on the estimated stress
        #[arg(long)]
        emotion: Option<String>,
    },
    /// Recommend for an emotion and optional stress level
    Recommend {
        #[arg(long)]
        emotion: String,

        /// High, Medium or Low
        #[arg(long)]
        stress: Option<String>,

        /// Fixed RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the most recent sessions, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
struct VoiceReport<'a> {
    voice_analysis: &'a attune_voice::VoiceAnalysis,
    recommendations: attune_core::RecommendationBundle,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AttuneConfig::load_or_default(&args.config)?;

    match args.command {
        Command::Analyze {
            frames,
            window_secs,
        } => {
            let window = window_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.capture.emotion_window());
            let classifier = JsonlFrames::open(&frames).await?;
            let mut coordinator = StudyCoordinator::from_config(&config)?;

            info!("Analyzing {} over a {:?} window", frames.display(), window);
            let outcome = coordinator
                .analyze_emotion(&classifier, window)
                .await
                .map_err(describe)?;
            print_json(&outcome.record)?;

            if let Err(e) = outcome.persisted {
                error!("Session was not saved");
                return Err(e).context("Failed to persist session");
            }
        }
        Command::Voice { wav, emotion } => {
            let analyzer =
                VoiceAnalyzer::new(Arc::new(WavFileCapture::new(&wav)), Arc::new(NoTranscriber));
            let analysis = analyzer
                .analyze(config.capture.voice_window())
                .await
                .map_err(describe)?;

            match emotion {
                Some(emotion) => {
                    let mut coordinator = StudyCoordinator::from_config(&config)?;
                    let recommendations = coordinator
                        .recommend(&emotion, Some(analysis.estimated_stress.as_str()));
                    print_json(&VoiceReport {
                        voice_analysis: &analysis,
                        recommendations,
                    })?;
                }
                None => print_json(&analysis)?,
            }
        }
        Command::Recommend {
            emotion,
            stress,
            seed,
        } => {
            if seed.is_some() {
                config.recommendations.seed = seed;
            }
            let mut coordinator = StudyCoordinator::from_config(&config)?;
            print_json(&coordinator.recommend(&emotion, stress.as_deref()))?;
        }
        Command::History { limit } => {
            let store = SessionStore::new(&config.store.sessions_dir);
            let records = store
                .list_recent(limit.unwrap_or(config.store.history_limit))
                .await?;
            print_json(&records)?;
        }
    }

    Ok(())
}

/// NoSignal is an expected outcome; give it a plain message.
fn describe(e: AttuneError) -> anyhow::Error {
    if e.is_no_signal() {
        anyhow::anyhow!("{e}, nothing to analyze")
    } else {
        anyhow::Error::new(e)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
