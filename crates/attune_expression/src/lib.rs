//! Study recommendation selection conditioned on emotion and vocal stress.

mod selector;

pub use selector::{RecommendationSelector, ACTIVITIES, BASE_TIPS, MAX_STRESS_TIPS};
