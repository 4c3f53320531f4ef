use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One set of study recommendations, built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    /// The emotion exactly as the caller supplied it (not normalized).
    pub emotion: String,
    /// Two base tips followed by any stress-conditioned extras.
    pub study_tips: Vec<String>,
    pub motivational_quote: String,
    pub recommended_activities: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
