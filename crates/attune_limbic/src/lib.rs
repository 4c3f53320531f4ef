//! # attune limbic layer
//!
//! Fast, stateless reduction of raw affective signals:
//!
//! - **Aggregation**: a window of per-frame facial classifications becomes one
//!   [`EmotionSummary`](attune_core::EmotionSummary).
//! - **Stress**: a raw 16-bit audio buffer becomes one
//!   [`StressEstimate`](attune_core::StressEstimate).
//! - **Window**: the time-bounded loop that polls a frame classifier.
//!
//! Aggregation and stress estimation are pure; only the window touches the
//! clock.

mod aggregator;
pub mod stress;
mod window;

pub use aggregator::aggregate;
pub use stress::StressEstimator;
pub use window::{collect_window, WindowStats};
