//! result.rs — analysis records. The three-way sentiment label is derived
//! from the signed score on read, never stored next to it, so no record can
//! carry a label that disagrees with its score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse polarity label for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Threshold rule: `> 10` is positive, `< -10` is negative, everything
    /// else is neutral. Both boundary values (10 and -10) classify neutral.
    pub fn from_score(score: i32) -> Self {
        if score > 10 {
            Sentiment::Positive
        } else if score < -10 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// One scored submission. Immutable once constructed; the feed only ever
/// hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique for the lifetime of the store.
    pub id: Uuid,
    /// Original input, verbatim. The scorer puts no length cap on it.
    pub text: String,
    /// Signed intensity in [-100, 100].
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(text: impl Into<String>, score: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            score,
            created_at: Utc::now(),
        }
    }

    /// Derived label; a pure function of `score`.
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict_on_both_boundaries() {
        assert_eq!(Sentiment::from_score(11), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(10), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(-10), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(-11), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(100), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(-100), Sentiment::Negative);
    }

    #[test]
    fn sentiment_is_derived_from_score_on_read() {
        let r = AnalysisResult::new("fine", 42);
        assert_eq!(r.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(Sentiment::Negative).unwrap(),
            serde_json::json!("negative")
        );
        assert_eq!(
            serde_json::to_value(Sentiment::Positive).unwrap(),
            serde_json::json!("positive")
        );
    }
}
