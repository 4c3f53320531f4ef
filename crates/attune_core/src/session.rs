use crate::emotion::EmotionSummary;
use crate::recommendation::RecommendationBundle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted pairing of one emotion summary with the bundle generated from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub emotion_analysis: EmotionSummary,
    pub recommendations: RecommendationBundle,
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    /// Pair a summary with its bundle, stamped now.
    pub fn assemble(summary: EmotionSummary, bundle: RecommendationBundle) -> Self {
        Self {
            emotion_analysis: summary,
            recommendations: bundle,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionLabel;
    use std::collections::BTreeMap;

    fn record() -> SessionRecord {
        let summary = EmotionSummary {
            dominant: EmotionLabel::Happy,
            percentages: BTreeMap::from([(EmotionLabel::Happy, 100.0)]),
            sample_count: 2,
            summarized_at: Utc::now(),
        };
        let bundle = RecommendationBundle {
            emotion: "Happy".to_string(),
            study_tips: vec!["a".into(), "b".into()],
            motivational_quote: "q".into(),
            recommended_activities: vec!["x".into()],
            generated_at: Utc::now(),
        };
        SessionRecord::assemble(summary, bundle)
    }

    #[test]
    fn test_assemble_keeps_both_halves() {
        let rec = record();
        assert_eq!(rec.emotion_analysis.dominant, EmotionLabel::Happy);
        assert_eq!(rec.recommendations.emotion, "Happy");
        assert!(rec.timestamp >= rec.emotion_analysis.summarized_at);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["emotion_analysis"]["dominant"], "happy");
        assert_eq!(json["emotion_analysis"]["percentages"]["happy"], 100.0);
        assert_eq!(json["emotion_analysis"]["sample_count"], 2);
        assert_eq!(json["recommendations"]["motivational_quote"], "q");
        assert_eq!(json["recommendations"]["study_tips"].as_array().unwrap().len(), 2);
        // ISO-8601 timestamps
        let ts = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok(), "not RFC 3339: {ts}");
    }
}
