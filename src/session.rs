//! session.rs — one caller's working state: the feed, the view, and the
//! single optional error message. No process-wide singleton; build as many
//! independent sessions as needed.

use std::sync::{Arc, Mutex};

use tracing::info;
use uuid::Uuid;

use crate::error::AnalyzeError;
use crate::feed::ResultFeed;
use crate::result::AnalysisResult;
use crate::score::Analyzer;
use crate::view::ViewState;

pub struct Session {
    analyzer: Arc<dyn Analyzer>,
    feed: ResultFeed,
    view: Mutex<ViewState>,
    last_error: Mutex<Option<String>>,
}

impl Session {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            feed: ResultFeed::new(),
            view: Mutex::new(ViewState::Feed),
            last_error: Mutex::new(None),
        }
    }

    /// Run one analysis. Success appends to the feed front and clears the
    /// error; failure records the user-visible message and leaves the feed
    /// and view exactly as they were.
    ///
    /// Concurrent submissions are allowed; each append is atomic and lands
    /// in the order its latency resolves, not the order submitted.
    pub async fn submit(&self, raw_text: &str) -> Result<AnalysisResult, AnalyzeError> {
        match self.analyzer.analyze(raw_text).await {
            Ok(result) => {
                self.feed.append(result.clone());
                *self.last_error.lock().expect("error mutex poisoned") = None;
                info!(
                    target: "session",
                    id = %result.id,
                    score = result.score,
                    sentiment = %result.sentiment(),
                    backend = self.analyzer.name(),
                    "analysis appended"
                );
                Ok(result)
            }
            Err(err) => {
                *self.last_error.lock().expect("error mutex poisoned") = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn feed(&self) -> &ResultFeed {
        &self.feed
    }

    pub fn view(&self) -> ViewState {
        self.view.lock().expect("view mutex poisoned").clone()
    }

    /// Open the split view on a stored result. `None` when the id does not
    /// resolve against the feed; the view is untouched in that case.
    pub fn select(&self, id: Uuid) -> Option<AnalysisResult> {
        let result = self.feed.get(id)?;
        self.view
            .lock()
            .expect("view mutex poisoned")
            .select(result.clone());
        Some(result)
    }

    pub fn close(&self) {
        self.view.lock().expect("view mutex poisoned").close();
    }

    /// External cancellation signal; see [`ViewState::cancel`].
    pub fn cancel(&self) {
        self.view.lock().expect("view mutex poisoned").cancel();
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().expect("error mutex poisoned").clone()
    }

    /// Dismiss the error message.
    pub fn clear_error(&self) {
        *self.last_error.lock().expect("error mutex poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{FixedJitter, SentimentScorer};
    use std::time::Duration;

    fn test_session(jitter: f64) -> Session {
        let scorer = SentimentScorer::new()
            .with_latency(Duration::ZERO)
            .with_jitter(Box::new(FixedJitter(jitter)));
        Session::new(Arc::new(scorer))
    }

    #[tokio::test]
    async fn submit_appends_and_clears_the_error() {
        let session = test_session(0.0);
        session.submit("").await.unwrap_err();
        assert_eq!(
            session.last_error().as_deref(),
            Some("Please enter some text to analyze.")
        );

        let r = session.submit("I love this").await.unwrap();
        assert_eq!(session.last_error(), None);
        assert_eq!(session.feed().all(), vec![r]);
    }

    #[tokio::test]
    async fn failed_submit_leaves_feed_and_view_untouched() {
        let session = test_session(0.0);
        let kept = session.submit("nice day").await.unwrap();
        session.select(kept.id).unwrap();

        session.submit("   ").await.unwrap_err();
        assert_eq!(session.feed().len(), 1);
        assert_eq!(session.view().selected(), Some(&kept));
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn select_requires_a_stored_result() {
        let session = test_session(0.0);
        assert!(session.select(Uuid::new_v4()).is_none());
        assert_eq!(session.view(), ViewState::Feed);

        let r = session.submit("smile").await.unwrap();
        let picked = session.select(r.id).unwrap();
        assert_eq!(picked, r);
        assert!(session.view().is_split());

        session.cancel();
        assert_eq!(session.view(), ViewState::Feed);
    }

    #[tokio::test]
    async fn clear_error_dismisses_the_message() {
        let session = test_session(0.0);
        session.submit(" ").await.unwrap_err();
        assert!(session.last_error().is_some());
        session.clear_error();
        assert_eq!(session.last_error(), None);
    }

    #[tokio::test]
    async fn concurrent_submissions_all_append() {
        let session = Arc::new(test_session(0.0));
        let mut handles = Vec::new();
        for i in 0..8 {
            let s = Arc::clone(&session);
            handles.push(tokio::spawn(
                async move { s.submit(&format!("happy #{i}")).await },
            ));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(session.feed().len(), 8);
    }
}
