//! # Sentiment Scorer
//! Keyword-heuristic scoring with injectable jitter. Pure helpers
//! (`clamp`, `base_score`, `matched_keywords`) carry the rule logic; the
//! async `SentimentScorer` adds the simulated latency and the entropy step.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::config::ScorerConfig;
use crate::error::AnalyzeError;
use crate::result::AnalysisResult;

/// One additive rule. A rule fires at most once no matter how many of its
/// keywords occur in the text.
struct Rule {
    delta: i32,
    keywords: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        delta: 45,
        keywords: &["love", "great", "awesome"],
    },
    Rule {
        delta: 15,
        keywords: &["like", "nice"],
    },
    Rule {
        delta: -55,
        keywords: &["hate", "terrible", "awful"],
    },
    Rule {
        delta: 10,
        keywords: &["smile", "happy"],
    },
    Rule {
        delta: -15,
        keywords: &["angry", "mad"],
    },
];

/// Round to nearest integer, then bound to [-100, 100].
pub fn clamp(x: f64) -> i32 {
    (x.round() as i64).clamp(-100, 100) as i32
}

/// Sum of all rules that fire on the lower-cased text. Plain substring
/// matching; "likely" counts as "like".
pub fn base_score(text: &str) -> i32 {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .filter(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .map(|r| r.delta)
        .sum()
}

/// Every rule keyword present in the text, in rule order. Explanatory only;
/// has no effect on scoring.
pub fn matched_keywords(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .flat_map(|r| r.keywords.iter().copied())
        .filter(|k| lower.contains(k))
        .collect()
}

/// Entropy source for the jitter step. Production uses [`UniformJitter`];
/// tests pin outcomes with [`FixedJitter`].
pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Uniform draw over the real interval [-amplitude, +amplitude].
#[derive(Debug, Clone, Copy)]
pub struct UniformJitter {
    amplitude: f64,
}

impl UniformJitter {
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude: amplitude.abs(),
        }
    }
}

impl JitterSource for UniformJitter {
    fn sample(&self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        rand::rng().random_range(-self.amplitude..=self.amplitude)
    }
}

/// Fixed offset; deterministic scoring for tests and offline evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Common contract for the local heuristic and the networked classifier.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalyzeError>;
    /// Backend name for diagnostics/logging.
    fn name(&self) -> &'static str;
}

/// Local heuristic backend.
pub struct SentimentScorer {
    latency: Duration,
    jitter: Box<dyn JitterSource>,
}

impl SentimentScorer {
    /// Production defaults: 800 ms simulated latency, jitter over [-9, +9].
    pub fn new() -> Self {
        Self::from_config(&ScorerConfig::default())
    }

    pub fn from_config(cfg: &ScorerConfig) -> Self {
        Self {
            latency: Duration::from_millis(cfg.latency_ms),
            jitter: Box::new(UniformJitter::new(cfg.jitter_max)),
        }
    }

    /// Replace the entropy source (deterministic tests).
    pub fn with_jitter(mut self, jitter: Box<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Override the simulated latency; `Duration::ZERO` skips the sleep.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for SentimentScorer {
    async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if raw_text.trim().is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }

        // Suspension point standing in for a remote model call.
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let base = base_score(raw_text);
        let score = clamp(f64::from(base) + self.jitter.sample());
        debug!(target: "score", base, score, "scored text");
        Ok(AnalysisResult::new(raw_text, score))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
