//! remote.rs — networked classifier adapter: same `analyze` contract as the
//! local scorer, backed by an HTTP endpoint that returns a label plus an
//! unsigned 0–100 magnitude.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ScorerConfig;
use crate::error::AnalyzeError;
use crate::result::{AnalysisResult, Sentiment};
use crate::score::{Analyzer, SentimentScorer};

/// Wire shape sent to the endpoint.
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Wire shape returned by the endpoint. The magnitude is unsigned; the sign
/// convention is ours, not the wire's.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// Magnitude in 0..=100.
    pub score: i32,
}

/// Translate the unsigned wire magnitude into the signed convention:
/// negative negates, neutral forces zero, positive passes through. Nothing
/// else; out-of-range magnitudes are clamped into 0..=100 first.
pub fn signed_score(c: &Classification) -> i32 {
    let magnitude = c.score.clamp(0, 100);
    match c.sentiment {
        Sentiment::Negative => -magnitude,
        Sentiment::Neutral => 0,
        Sentiment::Positive => magnitude,
    }
}

/// Remote classification backend.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, AnalyzeError>;
    fn name(&self) -> &'static str;
}

/// HTTP classifier: POSTs `{"text": ...}` as JSON and expects
/// `{"sentiment": ..., "score": ...}` back.
pub struct RemoteClassifier {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("tweet-sentiment-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, AnalyzeError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&ClassifyRequest { text })
            .send()
            .await?
            .error_for_status()?;
        let body: Classification = resp.json().await?;
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Fixed-answer classifier for tests and local runs.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    pub fixed: Classification,
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _text: &str) -> Result<Classification, AnalyzeError> {
        Ok(self.fixed.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Adapts a [`Classifier`] to the common [`Analyzer`] contract: validates
/// input, calls out, and records the translated signed score.
pub struct RemoteAnalyzer<C: Classifier> {
    inner: C,
}

impl<C: Classifier> RemoteAnalyzer<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Classifier> Analyzer for RemoteAnalyzer<C> {
    async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if raw_text.trim().is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }
        let classification = self.inner.classify(raw_text).await?;
        Ok(AnalysisResult::new(raw_text, signed_score(&classification)))
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Factory: remote backend when a URL is configured, local heuristic
/// otherwise.
pub fn build_analyzer(cfg: &ScorerConfig) -> Arc<dyn Analyzer> {
    match cfg.remote_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            Arc::new(RemoteAnalyzer::new(RemoteClassifier::new(url.trim())))
        }
        _ => Arc::new(SentimentScorer::from_config(cfg)),
    }
}
